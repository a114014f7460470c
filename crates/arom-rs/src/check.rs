use std::fs::{self, File};

use arom_core::{Report, RomImage, checksum, inspect};
use log::{error, info, warn};

pub fn check(
    file: &str,
    extend: bool,
    fix: bool,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Amiga ROM checksum calculator");

    let bytes = fs::read(file)?;
    let report = inspect(&bytes);
    print_report(file, &report);

    let mut image = RomImage::parse(&bytes);
    let changed = image.fix(&report, extend, fix)?;

    if changed {
        let output_path = output.unwrap_or(file);
        info!("Writing file {}", output_path);
        let out = File::create(output_path)?;
        image.write_to(out)?;
    }

    Ok(())
}

fn print_report(file: &str, report: &Report) {
    if report.kb_aligned {
        info!("Found file \"{}\", length {} kb", file, report.byte_len / 1024);
    } else {
        info!("Found file \"{}\", length {} bytes", file, report.byte_len);
    }

    match report.magic_id {
        Some(id) => {
            info!("Magic id: {:#06x}", id);
            if report.size_class.is_none() {
                warn!("Unrecognized magic id: {:#06x}", id);
            }
        }
        None => warn!("File is empty, no magic id"),
    }

    if report.len_matches_magic() == Some(false) {
        warn!(
            "File length does not match magic id: {:#06x}",
            report.magic_id.unwrap_or(0)
        );
    }

    if !report.dword_aligned {
        error!("File length is not whole 32 bit words. Use option --extend to fix length error");
    }

    match report.stored_len {
        Some(_) if !report.stored_len_ok() => {
            error!("File length does not match stored length. Use option --extend to fix length error")
        }
        None => warn!("File is too short to hold a length field"),
        _ => {}
    }

    if !report.rom256k_aligned {
        warn!("File has unusual length, not evenly divisable by 256 kb");
    }

    let res = if report.checksum_ok() { "ok" } else { "incorrect" };
    info!("Checksum {} ({:#010x})", res, !report.sum);

    if report.err != 0 {
        info!(
            "Err = {:#010x}, new checksum = {:#010x}",
            report.err,
            checksum::add_carry(report.sum, report.err)
        );
    }
}
