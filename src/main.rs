use console::style;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let res = vizdiff_cli::app::run().await;
    if let Err(err) = res {
        eprintln!("{} {:#}", style("Error:").bold().red(), err);
        std::process::exit(1);
    }
}
