//! Task Lists MCP Server - Main Entry Point
//!
//! This is the main entry point for the task list MCP server application.
//! The actual implementation is in the `tasklists_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tasklists_mcp::TaskListServerHandler;
use tasklists_mcp::logging::{self, DEFAULT_LOG_LEVEL};

/// Task Lists MCP Server - named task lists with due dates via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file
    file: String,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    let _logger = logging::init_logging(&args.log_level, args.log_dir.as_deref())?;

    let handler = TaskListServerHandler::new(&args.file)?;
    serve_stdio(handler).await?;
    Ok(())
}
