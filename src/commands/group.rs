//! Study group record management command.

use super::entity::{self, EntityAction};
use crate::db::entities;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    action: EntityAction,
}

pub fn cmd(args: GroupArgs) -> Result<()> {
    entity::run(&entities::ST_GROUP, args.action)
}
