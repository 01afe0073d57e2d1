use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;

mod args;
mod config;
mod logging;
mod parse_header;
mod public_key;
mod sign;
mod util;
mod verify;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    logging::initialise()?;

    let args = ToolArgs::parse();
    match args.subcommand {
        ToolSubcommand::ParseHeader(args) => parse_header::do_it(&args.header),
        ToolSubcommand::PublicKey(args) => public_key::do_it(args).await,
        ToolSubcommand::Sign(args) => sign::do_it(args).await,
        ToolSubcommand::Verify(args) => verify::do_it(args).await,
    }
}
