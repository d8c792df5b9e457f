use dev_browser_cli::{launcher, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	logging::init_logging();

	match launcher::run(dev_browser::serve, std::io::stdout()).await? {}
}
