//! Example rendering the same pair of texts with every renderer
//!
//! Run with: cargo run --example side_by_side

use side_by_side::constant::{SAMPLE_LEFT, SAMPLE_RIGHT};
use side_by_side::{Comparator, InlineMarkedRenderer, LineStackedRenderer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Line-stacked ===\n");
    let mut comparator = Comparator::with_renderer(LineStackedRenderer::default());
    let text = comparator.comparison_string(&SAMPLE_LEFT, &SAMPLE_RIGHT)?;
    print!("{text}");

    println!("\n=== Inline-marked ===\n");
    let mut comparator = Comparator::with_renderer(InlineMarkedRenderer::default());
    let text = comparator.comparison_string(&SAMPLE_LEFT, &SAMPLE_RIGHT)?;
    print!("{text}");

    println!("\n=== Inline-marked, custom brackets ===\n");
    let renderer = InlineMarkedRenderer::new(" ║ ", true)
        .with_brackets(("{+", "+}"), ("[-", "-]"));
    let mut comparator = Comparator::with_renderer(renderer);
    let text = comparator.comparison_string(&SAMPLE_LEFT, &SAMPLE_RIGHT)?;
    print!("{text}");

    Ok(())
}
