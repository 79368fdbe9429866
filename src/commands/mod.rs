pub mod entity;
pub mod group;
pub mod init;
pub mod migrate;
pub mod student;
pub mod teacher;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Apply pending database schema migrations")]
    Migrate,
    #[command(about = "Manage teacher records")]
    Teacher(teacher::TeacherArgs),
    #[command(about = "Manage student records")]
    Student(student::StudentArgs),
    #[command(about = "Manage study group records")]
    Group(group::GroupArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Migrate => migrate::cmd(),
            Commands::Teacher(args) => teacher::cmd(args),
            Commands::Student(args) => student::cmd(args),
            Commands::Group(args) => group::cmd(args),
        }
    }
}
