use clap::Parser;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use voyager_ls::VoyagerLs;

/// A Language Server Protocol (LSP) server providing code completion for
/// pydantic data-model modules
#[derive(Parser)]
#[command(name = "voyager-ls")]
#[command(version)]
#[command(
    about = "A Language Server Protocol (LSP) server providing code completion for pydantic data-model modules"
)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    env_logger::init();

    let stdin = stdin();
    let stdout = stdout();

    let (service, socket) = LspService::new(VoyagerLs::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
