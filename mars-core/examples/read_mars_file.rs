//! Пример: чтение MARS-файла через MarsStream
//!
//! Демонстрирует:
//! - открытие файла и последовательное чтение блоков данных
//! - декодирование отсчётов с масштабом и усилением
//! - итоговую статистику потока

use mars_core::MarsStream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let input_path = "mars-core/test_output.mars";
    let mut stream = MarsStream::open(input_path)?;

    println!("✓ Opened {}", stream.path().display());
    println!("  Size : {} bytes", stream.size());

    let mut shown = 0;
    while let Some(block) = stream.next_block()? {
        let decoded = block.decode()?;

        if shown < 3 {
            println!("\n[{shown}] {}", block.describe());
            println!("  Rate    : {} Hz", block.sample_rate_hz());
            println!("  Scale   : {}", decoded.scale);
            println!("  Gain    : {}", decoded.gain);
            println!("  Samples : {:?} ...", &decoded.samples[..8]);
            shown += 1;
        }
    }

    let stats = stream.stats();
    println!("\n✓ Read complete");
    println!("  Blocks read    : {}", stats.blocks_read);
    println!("  Blocks skipped : {}", stats.blocks_skipped);
    println!("  Data blocks    : {}", stats.data_blocks);

    Ok(())
}
