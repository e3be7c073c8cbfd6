use tessel::{
    app::{AppConfig, TesselApp},
    gfx::scene::Scene,
    logging::init_logging,
};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::default().with_title("tessel - primitives");
    init_logging(config.logging.clone());

    let scene = Scene::demo()?;
    TesselApp::new(config, scene).run()
}
