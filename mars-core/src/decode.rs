//! Распаковка 16-битных слов данных в знаковые отсчёты.
//!
//! Форматы с мантиссой/экспонентой: младшие N бит слова — экспонента,
//! остальное (с очищенными младшими битами) — мантисса. Маскирование и
//! сдвиг выполняются над знаковым словом, поэтому знак отсчёта
//! сохраняется. У MARS-88 сдвиг равен 16 − экспонента, у MARSlite —
//! 16 − 2·экспонента.

use mars_types::{BlockHeader, MarsResult, SampleEncoding};

use crate::binary::read_i16_at;
use crate::format::{MARS_BLOCK_DATA_SIZE, MARS_BLOCK_SAMPLES};

fn unpack_m88(word: i16, mask: i16) -> i32 {
    let mantissa = i32::from(word & !mask);
    let exponent = (word & mask) as u32;
    mantissa << (16 - exponent)
}

fn unpack_lite(word: i16) -> i32 {
    let mantissa = i32::from(word & !0x07);
    let exponent = (word & 0x07) as u32;
    mantissa << (16 - 2 * exponent)
}

/// Декодирует одно слово данных.
///
/// Для [`SampleEncoding::LiteFloatDiff`] результат — разность с предыдущим
/// отсчётом, а не абсолютное значение; восстановлением занимается
/// [`decode_block`].
pub fn decode_word(word: i16, encoding: SampleEncoding) -> i32 {
    match encoding {
        SampleEncoding::Linear => i32::from(word),
        SampleEncoding::M88Float2 => unpack_m88(word, 0x03),
        SampleEncoding::M88Float3 => unpack_m88(word, 0x07),
        SampleEncoding::M88Float4 => unpack_m88(word, 0x0F),
        SampleEncoding::LiteFloat | SampleEncoding::LiteFloatDiff => unpack_lite(word),
    }
}

/// Декодирует 500 слов области данных блока в отсчёты.
///
/// Кодировка берётся из заголовка (монитор-блоки принудительно Linear);
/// тег вне 0..=5 — ошибка, а не нулевые данные. Для дифференциальной
/// кодировки аккумулятор засевается полем diff_start заголовка,
/// декодированным тем же словным правилом, и живёт ровно один вызов —
/// состояние между блоками не переносится.
pub fn decode_block(header: &BlockHeader, data: &[u8]) -> MarsResult<Vec<i32>> {
    debug_assert_eq!(data.len(), MARS_BLOCK_DATA_SIZE);

    let encoding = header.effective_encoding()?;
    let mut samples = Vec::with_capacity(MARS_BLOCK_SAMPLES);

    if encoding.is_differential() {
        // Стартовое значение есть только в заголовке MARSlite
        let seed = match header {
            BlockHeader::Lite(h) => decode_word(h.diff_start, encoding),
            BlockHeader::M88(_) => 0,
        };

        let mut sum = seed;
        for i in 0..MARS_BLOCK_SAMPLES {
            let delta = decode_word(read_i16_at(data, 2 * i), encoding);
            sum = sum.wrapping_add(delta);
            samples.push(sum);
        }
    } else {
        for i in 0..MARS_BLOCK_SAMPLES {
            samples.push(decode_word(read_i16_at(data, 2 * i), encoding));
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use mars_types::{BlockFormat, LiteHeader, M88Header, MarsError};

    use super::*;
    use crate::format::{build_block, MAGIC_NATIVE, MARS_HEADER_SIZE};

    /// Собирает слово MARSlite/MARS-88 из мантиссы и экспоненты
    fn word(mantissa: i16, exponent: i16, mask: i16) -> i16 {
        (mantissa & !mask) | (exponent & mask)
    }

    fn m88_header(data_format: u8) -> BlockHeader {
        BlockHeader::M88(M88Header {
            magic: MAGIC_NATIVE,
            block_format: BlockFormat::M88Data,
            data_format,
            device_id: 1,
            time: 0,
            time_lag_ms: 0,
            sync_mode: 0,
            channel: 0,
            sample_rate_code: 3,
            max_amplitude: 0,
            scale: 2,
        })
    }

    fn lite_header(data_format: u8, diff_start: i16) -> BlockHeader {
        BlockHeader::Lite(LiteHeader {
            magic: MAGIC_NATIVE,
            block_format: BlockFormat::LiteData,
            data_format,
            station_name: *b"AQU\0",
            time: 0,
            channel: 0,
            sample_interval_code: 2,
            max_amplitude: 0,
            scale: 4,
            trigger_index: 0,
            diff_start,
        })
    }

    #[test]
    fn test_linear_is_identity() {
        for v in [0i16, 1, -1, 100, i16::MAX, i16::MIN] {
            assert_eq!(decode_word(v, SampleEncoding::Linear), i32::from(v));
        }
    }

    #[test]
    fn test_m88_float2_formula() {
        // мантисса 20, экспонента 2: 20 << 14
        let w = word(20, 2, 0x03);
        assert_eq!(decode_word(w, SampleEncoding::M88Float2), 20 << 14);

        // отрицательная мантисса: знак сохраняется сквозь сдвиг
        let w = word(-8, 1, 0x03);
        assert_eq!(decode_word(w, SampleEncoding::M88Float2), -8 << 15);
    }

    #[test]
    fn test_m88_float3_formula() {
        let w = word(64, 5, 0x07);
        assert_eq!(decode_word(w, SampleEncoding::M88Float3), 64 << 11);
    }

    #[test]
    fn test_m88_float4_formula() {
        let w = word(-32, 15, 0x0F);
        assert_eq!(decode_word(w, SampleEncoding::M88Float4), -32 << 1);
    }

    #[test]
    fn test_lite_float_double_shift() {
        // экспонента удваивается: мантисса 8, экспонента 7 → 8 << 2
        let w = word(8, 7, 0x07);
        assert_eq!(decode_word(w, SampleEncoding::LiteFloat), 8 << 2);

        let w = word(8, 0, 0x07);
        assert_eq!(decode_word(w, SampleEncoding::LiteFloat), 8 << 16);
    }

    #[test]
    fn test_exponent_bits_masked_from_mantissa() {
        // Все младшие биты установлены: в мантиссу не попадают
        let w: i16 = 0x0007;
        assert_eq!(decode_word(w, SampleEncoding::M88Float3), 0);
        assert_eq!(decode_word(w, SampleEncoding::LiteFloat), 0);
    }

    #[test]
    fn test_decode_block_linear() {
        let header = m88_header(0);
        let buf = build_block(&header, &[100i16; MARS_BLOCK_SAMPLES]);
        let samples = decode_block(&header, &buf[MARS_HEADER_SIZE..]).unwrap();

        assert_eq!(samples.len(), MARS_BLOCK_SAMPLES);
        assert!(samples.iter().all(|&s| s == 100));
    }

    #[test]
    fn test_decode_block_differential_prefix_sum() {
        // Сид 32 (слово: мантисса 8, экспонента 7), дельты ±32
        let seed_word = word(8, 7, 0x07);
        let plus = word(8, 7, 0x07); // +32
        let minus = word(-8, 7, 0x07); // -32

        let mut words = [0i16; MARS_BLOCK_SAMPLES];
        for (i, w) in words.iter_mut().enumerate() {
            *w = if i % 2 == 0 { plus } else { minus };
        }

        let header = lite_header(5, seed_word);
        let buf = build_block(&header, &words);
        let samples = decode_block(&header, &buf[MARS_HEADER_SIZE..]).unwrap();

        // seed + d0 = 64, затем чередование 32/64
        assert_eq!(samples[0], 64);
        assert_eq!(samples[1], 32);
        assert_eq!(samples[2], 64);
        assert_eq!(samples[3], 32);
        assert_eq!(samples[499], 32);
    }

    #[test]
    fn test_differential_seed_fresh_per_block() {
        let seed_word = word(8, 7, 0x07); // 32
        let zero = word(0, 7, 0x07);

        let header = lite_header(5, seed_word);
        let buf = build_block(&header, &[zero; MARS_BLOCK_SAMPLES]);

        // Два вызова подряд дают одинаковый результат: аккумулятор
        // не утекает между блоками
        let first = decode_block(&header, &buf[MARS_HEADER_SIZE..]).unwrap();
        let second = decode_block(&header, &buf[MARS_HEADER_SIZE..]).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|&s| s == 32));
    }

    #[test]
    fn test_monitor_block_forced_linear() {
        let mut header = m88_header(3); // записан тег M88Float4
        if let BlockHeader::M88(h) = &mut header {
            h.block_format = BlockFormat::M88Monitor;
        }
        let buf = build_block(&header, &[-5i16; MARS_BLOCK_SAMPLES]);
        let samples = decode_block(&header, &buf[MARS_HEADER_SIZE..]).unwrap();

        assert!(samples.iter().all(|&s| s == -5));
    }

    #[test]
    fn test_unsupported_encoding_is_error() {
        let header = m88_header(6);
        let buf = build_block(&header, &[0i16; MARS_BLOCK_SAMPLES]);

        match decode_block(&header, &buf[MARS_HEADER_SIZE..]) {
            Err(MarsError::UnsupportedEncoding(6)) => {}
            other => panic!("expected UnsupportedEncoding(6), got {other:?}"),
        }
    }
}
