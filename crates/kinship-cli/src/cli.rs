//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use kinship_domain::{MemberId, RelationLabel, Sex};
use std::path::PathBuf;

/// Kinship CLI - Manage members and their family relations.
#[derive(Debug, Parser)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configuration)
    #[arg(short, long, global = true, env = "KINSHIP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log inference details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage members
    Member(MemberArgs),

    /// Manage family relations
    Family(FamilyArgs),
}

/// Arguments for member management.
#[derive(Debug, Parser)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub action: MemberAction,
}

/// Member management actions.
#[derive(Debug, Subcommand)]
pub enum MemberAction {
    /// Register a new member
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Sex (left unspecified if omitted)
        #[arg(short, long, value_enum)]
        sex: Option<SexArg>,
    },

    /// List all members
    List,

    /// Show one member
    Show {
        /// Member ID
        id: MemberId,
    },

    /// Remove a member and the edges it owns
    Remove {
        /// Member ID
        id: MemberId,
    },
}

/// Arguments for family management.
#[derive(Debug, Parser)]
pub struct FamilyArgs {
    #[command(subcommand)]
    pub action: FamilyAction,
}

/// Family management actions.
#[derive(Debug, Subcommand)]
pub enum FamilyAction {
    /// Link two members and infer the relations that follow
    Link {
        /// Member whose family list gets the edge
        subject: MemberId,
        /// What the linked member is to the subject
        #[arg(value_enum)]
        label: LabelArg,
        /// Linked member ID
        linked: MemberId,
    },

    /// Record a relative who is not a registered member
    Relative {
        /// Member whose family list gets the edge
        subject: MemberId,
        /// What the relative is to the subject
        #[arg(value_enum)]
        label: LabelArg,
        /// Relative's name
        name: String,
    },

    /// Show a member's family edges
    Show {
        /// Member ID
        id: MemberId,
    },

    /// Re-run inference for a member
    Infer {
        /// Member ID
        id: MemberId,
    },

    /// Remove every edge a member owns
    Clear {
        /// Member ID
        id: MemberId,
    },
}

/// Sex argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SexArg {
    /// Male
    Male,
    /// Female
    Female,
}

/// Relation label argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LabelArg {
    /// Father of the subject
    Father,
    /// Mother of the subject
    Mother,
    /// Spouse of the subject
    Spouse,
    /// Child of the subject
    Child,
    /// Sibling of the subject
    Sibling,
    /// Grandparent of the subject
    Grandparent,
    /// Grandchild of the subject
    Grandchild,
    /// Any other relative
    Other,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SexArg> for Sex {
    fn from(sex: SexArg) -> Self {
        match sex {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

impl From<LabelArg> for RelationLabel {
    fn from(label: LabelArg) -> Self {
        match label {
            LabelArg::Father => RelationLabel::Father,
            LabelArg::Mother => RelationLabel::Mother,
            LabelArg::Spouse => RelationLabel::Spouse,
            LabelArg::Child => RelationLabel::Child,
            LabelArg::Sibling => RelationLabel::Sibling,
            LabelArg::Grandparent => RelationLabel::Grandparent,
            LabelArg::Grandchild => RelationLabel::Grandchild,
            LabelArg::Other => RelationLabel::Other,
        }
    }
}
