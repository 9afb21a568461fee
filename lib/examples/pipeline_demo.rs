/// Pipeline example: run a generated test image through the full pipeline
///
/// Builds a synthetic photo-sized image, encodes it to JPEG and runs every
/// stage, printing the per-stage timings and the ASCII rendering.
use image::{Rgba, RgbaImage};
use pixmill::codec::{self, EncodeFormat};
use pixmill::{PipelineConfig, pipeline};

fn main() {
    println!("pixmill - Pipeline Example");
    println!("==========================\n");

    // Create a 1600x1200 test image: diagonal gradient with a bright disc
    let width = 1600;
    let height = 1200;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        if (dx * dx + dy * dy).sqrt() < 300.0 {
            Rgba([240, 240, 240, 255])
        } else {
            let shade = ((x + y) * 255 / (width + height)) as u8;
            Rgba([shade, shade / 2, 255 - shade, 255])
        }
    });

    println!("Created test image: {}x{}", width, height);

    let bytes = codec::encode(&img, EncodeFormat::Jpeg).expect("jpeg encoding failed");
    println!("Encoded input: {} bytes\n", bytes.len());

    let config = PipelineConfig::default();
    let out = pipeline::run(&bytes, &config).expect("pipeline failed");

    println!("Cropping took {:?}", out.crops.elapsed);
    println!("Greyscale took {:?}", out.grayscale.elapsed);
    println!("Resize took {:?}", out.thumbnail.elapsed);
    println!("ASCII Conversion took {:?}", out.ascii.elapsed);
    println!("Program took {:?}\n", out.total);

    println!("Artifact sizes:");
    println!("  centercrop.jpg   {} bytes", out.crops.value.center.len());
    println!("  rectcrop.jpg     {} bytes", out.crops.value.rect.len());
    println!("  smallpicture.jpg {} bytes", out.thumbnail.value.len());
    println!("  grayscale jpeg   {} bytes\n", out.grayscale.value.len());

    print!("{}", out.ascii.value);
}
