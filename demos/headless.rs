use staticmap::prelude::*;

/// Renders a static map to disk.
///
/// With no arguments a map of central Tokyo is written to `map.png`.
/// Otherwise: `headless <options.json> [output]`.
#[tokio::main]
async fn main() -> staticmap::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => StaticMapOptions::from_json_file(&path)?,
        None => tokyo(),
    };
    let output = args
        .next()
        .unwrap_or_else(|| format!("map.{}", options.format.extension()));

    println!("🗺️ Static map");
    println!("=============");

    let map = StaticMap::new(options)?;
    println!(
        "   Center: {:.4}, {:.4}",
        map.calculated_center().lat,
        map.calculated_center().lng
    );
    println!("   Zoom: {}", map.calculated_zoom());

    let rendered = map.render_with_report().await?;
    std::fs::write(&output, &rendered.image)?;

    println!(
        "✅ Wrote {} ({} bytes, {}/{} tiles)",
        output,
        rendered.image.len(),
        rendered.report.drawn_tiles(),
        rendered.report.tiles.len()
    );
    for coord in rendered.report.failed_tiles() {
        println!("   missing tile {}", coord);
    }

    Ok(())
}

fn tokyo() -> StaticMapOptions {
    let tokyo = LatLng::new(35.6762, 139.6503);
    StaticMapBuilder::new(800, 600)
        .with_center_and_zoom(tokyo, 12)
        .with_marker(Marker::new(tokyo).with_label("Tokyo"))
        .with_marker(
            Marker::new(LatLng::new(35.6586, 139.7454))
                .with_color("#0066FF")
                .with_size(MarkerSize::Small),
        )
        .with_path(
            Path::new(vec![tokyo, LatLng::new(35.6586, 139.7454)])
                .with_color("#FF6600")
                .with_width(3.0),
        )
        .into_options()
}
