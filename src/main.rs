use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = beancount_import_cn::args::parse();
    beancount_import_cn::run(args)
}
