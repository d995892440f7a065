//! PNG snapshot of a rendered frame, with view-state tEXt metadata.

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use fractalview_core::ViewState;

use crate::frame::FrameBuffer;

/// Write a rendered frame as a PNG file.
///
/// The view state that produced the frame is embedded as tEXt chunks
/// readable by exiftool and most image viewers, so a snapshot can be
/// located again by hand.
pub fn export_png(frame: &FrameBuffer, path: &Path, view: &ViewState) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "fractalview".to_string())?;
    for (key, value) in metadata_pairs(view) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&frame.pixels)?;

    debug!(
        width = frame.width,
        height = frame.height,
        "exported PNG to {}",
        path.display()
    );
    Ok(())
}

fn metadata_pairs(view: &ViewState) -> Vec<(String, String)> {
    vec![
        ("Fractalview.CenterX".into(), format!("{}", view.center_x)),
        ("Fractalview.CenterY".into(), format!("{}", view.center_y)),
        ("Fractalview.Zoom".into(), format!("{}", view.zoom)),
        (
            "Fractalview.MaxIterations".into(),
            view.max_iterations.to_string(),
        ),
        (
            "Fractalview.Resolution".into(),
            format!("{}x{}", view.width, view.height),
        ),
    ]
}
