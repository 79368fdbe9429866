//! Teacher record management command.

use super::entity::{self, EntityAction};
use crate::db::entities;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TeacherArgs {
    #[command(subcommand)]
    action: EntityAction,
}

pub fn cmd(args: TeacherArgs) -> Result<()> {
    entity::run(&entities::TEACHER, args.action)
}
