use std::{
    fs::{self, File},
    io::BufReader,
};

use arom_core::{SizeClass, build_image};
use log::info;

pub fn build(
    inputs: &[String],
    size: SizeClass,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Amiga ROM file creator / linker");
    info!("Reading files: {:?}", inputs);

    let mut streams = Vec::with_capacity(inputs.len());
    for path in inputs {
        streams.push(BufReader::new(File::open(path)?));
    }

    let image = build_image(streams, size)?;

    let output_path = match output {
        Some(path) => path.to_string(),
        None => format!("{}.rom", inputs[0]),
    };

    info!("Writing file {}", output_path);
    let file = File::create(&output_path)?;
    if let Err(err) = image.write_to(file) {
        fs::remove_file(&output_path)?;
        return Err(Box::new(err));
    }

    Ok(())
}
