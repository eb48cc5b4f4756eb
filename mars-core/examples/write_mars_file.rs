//! Пример: запись MARS-файла с синтетической сейсмограммой
//!
//! Демонстрирует:
//! - сборку заголовков MARS-88 через build_block
//! - генерацию синусоиды в кодировке Linear
//! - плотную запись 1024-байтовых блоков

use std::{fs::File, io::Write};

use mars_core::{build_block, MAGIC_NATIVE, MARS_BLOCK_SAMPLES};
use mars_types::{BlockFormat, BlockHeader, M88Header};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = "mars-core/test_output.mars";
    let mut file = File::create(output_path)?;

    // --- Синтетическая синусоида 2 Hz, 125 Hz дискретизация ---
    let num_blocks = 8;
    let sample_interval_s = 0.008; // код интервала 3 → 8 мс
    let block_duration_s = (MARS_BLOCK_SAMPLES as f64 * sample_interval_s) as i32;

    for block_idx in 0..num_blocks {
        let mut words = [0i16; MARS_BLOCK_SAMPLES];
        for (i, w) in words.iter_mut().enumerate() {
            let t = (block_idx * MARS_BLOCK_SAMPLES + i) as f64 * sample_interval_s;
            *w = (20_000.0 * (2.0 * std::f64::consts::PI * 2.0 * t).sin()) as i16;
        }
        let max_amplitude = words.iter().map(|w| w.unsigned_abs()).max().unwrap_or(0) as i16;

        let header = BlockHeader::M88(M88Header {
            magic: MAGIC_NATIVE,
            block_format: BlockFormat::M88Data,
            data_format: 0,
            device_id: 0x0000_00A7,
            time: 820_000_000 + block_idx as i32 * block_duration_s,
            time_lag_ms: 0,
            sync_mode: 0,
            channel: 0,
            sample_rate_code: 3,
            max_amplitude,
            scale: 2,
        });

        file.write_all(&build_block(&header, &words))?;
        println!("Block {block_idx}: {MARS_BLOCK_SAMPLES} samples written");
    }

    file.flush()?;

    println!("\n✓ Записано: {output_path}");
    println!("  Blocks  : {num_blocks}");
    println!("  Samples : {}", num_blocks * MARS_BLOCK_SAMPLES);

    Ok(())
}
