//! Раскладка блока MARS на диске.
//!
//! Блок — ровно 1024 байта: 24-байтовый заголовок (вариант MARS-88 или
//! MARSlite, выбирается тегом формата) и 500 16-битных слов данных.
//! Межблочного фрейминга нет, файл — плотная последовательность блоков.
//! Многобайтовые поля хранятся в порядке байт регистратора; перед разбором
//! блок нормализуется к порядку хоста (см. [`crate::swap`]).

use mars_types::{BlockFormat, BlockHeader, LiteHeader, M88Header, MarsError, MarsResult};

use crate::binary::{read_i16_at, read_i32_at, read_u16_at, write_i16_at, write_i32_at, write_u16_at};

/// Размер блока на диске
pub const MARS_BLOCK_SIZE: usize = 1024;

/// Число слов данных в блоке
pub const MARS_BLOCK_SAMPLES: usize = 500;

/// Размер области данных в байтах
pub const MARS_BLOCK_DATA_SIZE: usize = 1000;

/// Размер заголовка (одинаков у обоих вариантов)
pub const MARS_HEADER_SIZE: usize = 24;

/// Магическое число "le", прочитанное в порядке байт хоста,
/// когда порядок файла совпадает с порядком хоста
pub const MAGIC_NATIVE: u16 = 0x656C;

/// То же магическое число при противоположном порядке байт файла
pub const MAGIC_SWAPPED: u16 = 0x6C65;

/// Каналы ≥ 3 зарезервированы и данных не несут
pub const MARS_MAX_CHANNELS: u8 = 3;

/// Магическое число блока в порядке байт хоста
pub fn read_magic(buf: &[u8; MARS_BLOCK_SIZE]) -> u16 {
    read_u16_at(buf, 0)
}

/// Проверяет магическое число и тег формата блока.
pub fn classify(buf: &[u8; MARS_BLOCK_SIZE]) -> MarsResult<BlockFormat> {
    let magic = read_magic(buf);
    let tag = buf[2];

    if magic != MAGIC_NATIVE && magic != MAGIC_SWAPPED {
        return Err(MarsError::UnrecognizedFormat {
            magic,
            block_format: tag,
        });
    }

    BlockFormat::from_u8(tag).ok_or(MarsError::UnrecognizedFormat {
        magic,
        block_format: tag,
    })
}

/// Распознанный блок данных (не монитор-блок и не мусор)
pub fn is_mars_data_block(buf: &[u8; MARS_BLOCK_SIZE]) -> bool {
    matches!(classify(buf), Ok(f) if f.is_data())
}

/// Разбор и сериализация заголовков поверх сырого 1024-байтового блока.
pub trait BlockHeaderExt: Sized {
    /// Разбирает заголовок из нормализованного (порядок хоста) блока.
    fn parse(buf: &[u8; MARS_BLOCK_SIZE]) -> MarsResult<Self>;

    /// Записывает заголовок в первые 24 байта блока (порядок хоста).
    fn serialize_into(&self, buf: &mut [u8; MARS_BLOCK_SIZE]);
}

impl BlockHeaderExt for BlockHeader {
    fn parse(buf: &[u8; MARS_BLOCK_SIZE]) -> MarsResult<Self> {
        let block_format = classify(buf)?;
        let magic = read_magic(buf);
        let data_format = buf[3];

        if block_format.is_m88() {
            let sample_rate_code = buf[17];
            let mut time = read_i32_at(buf, 8);

            // Дефект таймирования MARS-88: при интервалах дискретизации
            // ≥ 32 мс (код ≥ 5) блок записан с опозданием на одну свою
            // длительность, 1 << (код - 1) секунд.
            if (5..32).contains(&sample_rate_code) {
                time -= 1i32 << (sample_rate_code - 1);
            }

            Ok(BlockHeader::M88(M88Header {
                magic,
                block_format,
                data_format,
                device_id: read_i32_at(buf, 4),
                time,
                time_lag_ms: read_i16_at(buf, 12),
                sync_mode: read_u16_at(buf, 14),
                channel: buf[16],
                sample_rate_code,
                max_amplitude: read_i16_at(buf, 18),
                scale: buf[20],
            }))
        } else {
            let mut station_name = [0u8; 4];
            station_name.copy_from_slice(&buf[4..8]);

            Ok(BlockHeader::Lite(LiteHeader {
                magic,
                block_format,
                data_format,
                station_name,
                time: read_i32_at(buf, 12),
                channel: buf[16],
                sample_interval_code: buf[17],
                max_amplitude: read_i16_at(buf, 18),
                scale: buf[20],
                trigger_index: buf[21],
                diff_start: read_i16_at(buf, 22),
            }))
        }
    }

    fn serialize_into(&self, buf: &mut [u8; MARS_BLOCK_SIZE]) {
        buf[..MARS_HEADER_SIZE].fill(0);

        match self {
            BlockHeader::M88(h) => {
                write_u16_at(buf, 0, h.magic);
                buf[2] = h.block_format.as_u8();
                buf[3] = h.data_format;
                write_i32_at(buf, 4, h.device_id);
                write_i32_at(buf, 8, h.time);
                write_i16_at(buf, 12, h.time_lag_ms);
                write_u16_at(buf, 14, h.sync_mode);
                buf[16] = h.channel;
                buf[17] = h.sample_rate_code;
                write_i16_at(buf, 18, h.max_amplitude);
                buf[20] = h.scale;
            }
            BlockHeader::Lite(h) => {
                write_u16_at(buf, 0, h.magic);
                buf[2] = h.block_format.as_u8();
                buf[3] = h.data_format;
                buf[4..8].copy_from_slice(&h.station_name);
                write_i32_at(buf, 12, h.time);
                buf[16] = h.channel;
                buf[17] = h.sample_interval_code;
                write_i16_at(buf, 18, h.max_amplitude);
                buf[20] = h.scale;
                buf[21] = h.trigger_index;
                write_i16_at(buf, 22, h.diff_start);
            }
        }
    }
}

/// Собирает полный блок из заголовка и 500 слов данных (порядок хоста).
///
/// Используется генераторами фикстур и примерами; читающая сторона
/// формат записи не требует.
pub fn build_block(header: &BlockHeader, words: &[i16; MARS_BLOCK_SAMPLES]) -> [u8; MARS_BLOCK_SIZE] {
    let mut buf = [0u8; MARS_BLOCK_SIZE];
    header.serialize_into(&mut buf);
    for (i, &word) in words.iter().enumerate() {
        write_i16_at(&mut buf, MARS_HEADER_SIZE + 2 * i, word);
    }
    buf
}
