//! Student record management command.

use super::entity::{self, EntityAction};
use crate::db::entities;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StudentArgs {
    #[command(subcommand)]
    action: EntityAction,
}

pub fn cmd(args: StudentArgs) -> Result<()> {
    entity::run(&entities::STUDENT, args.action)
}
