//! Application configuration initialization command.
//!
//! Runs a short interactive wizard for first-time setup, prompting for the
//! listen port and database file name.

use anyhow::Result;
use clap::Args;

use crate::libs::{config::Config, messages::Message};
use crate::msg_success;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        Config::delete()?;
        msg_success!(Message::ConfigRemoved);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
