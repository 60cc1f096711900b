use side_by_side::Comparator;
use side_by_side::config::Config;
use side_by_side::constant::{SAMPLE_LEFT, SAMPLE_RIGHT};
use side_by_side::renderer::RendererKind;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::default();
    let render_all = std::env::args().skip(1).any(|arg| arg == "--all");
    let kinds = if render_all {
        RendererKind::ALL.to_vec()
    } else {
        vec![config.settings.renderer]
    };

    let mut comparator = Comparator::with_renderer(config.settings.build_renderer());
    for kind in kinds {
        comparator.set_renderer(config.settings.build_renderer_of(kind));
        for chunk in comparator.compare(&SAMPLE_LEFT, &SAMPLE_RIGHT) {
            print!("{}", chunk?);
        }
        println!();
    }

    Ok(())
}
