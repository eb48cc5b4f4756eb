use crate::{BlockFormat, MarsResult, SampleEncoding};

/// Биты поля sync_mode MARS-88: младший полубайт — режим синхронизации
pub const SM_NOSYNC: u16 = 0x01;
pub const SM_TSIG: u16 = 0x02;
pub const SM_DCF77: u16 = 0x04;

/// Биты поля sync_mode MARS-88: старший полубайт — состояние часов
pub const DCF_OK: u16 = 0x10;
pub const SYNC_OK: u16 = 0x20;

pub const TM_VALID: u16 = 0x80;

/// Заголовок блока MARS-88 (24 байта на диске)
#[derive(Debug, Clone)]
pub struct M88Header {
    /// Магическое число "le" в порядке байт файла
    pub magic: u16,
    pub block_format: BlockFormat,
    /// Тег кодировки данных; для монитор-блоков игнорируется
    pub data_format: u8,
    /// Аппаратный идентификатор устройства
    pub device_id: i32,
    /// Время начала блока, секунды epoch (уже с поправкой на дефект
    /// таймирования при интервалах дискретизации ≥ 32 мс)
    pub time: i32,
    /// Отставание времени в мс
    pub time_lag_ms: i16,
    /// Режим синхронизации и состояние часов (биты SM_* / *_OK)
    pub sync_mode: u16,
    pub channel: u8,
    /// Интервал дискретизации = 2^N мс
    pub sample_rate_code: u8,
    pub max_amplitude: i16,
    /// Масштаб = 2^N мкВ
    pub scale: u8,
}

/// Заголовок блока MARSlite (24 байта на диске)
#[derive(Debug, Clone)]
pub struct LiteHeader {
    pub magic: u16,
    pub block_format: BlockFormat,
    pub data_format: u8,
    /// Имя станции, дополненное NUL
    pub station_name: [u8; 4],
    /// Время начала блока, секунды epoch
    pub time: i32,
    pub channel: u8,
    /// Интервал дискретизации = 2^N мс
    pub sample_interval_code: u8,
    pub max_amplitude: i16,
    /// Масштаб = 2^N мкВ
    pub scale: u8,
    /// Индекс триггера / 2
    pub trigger_index: u8,
    /// Стартовое значение для дифференциальной кодировки,
    /// закодированное тем же словным форматом, что и данные
    pub diff_start: i16,
}

/// Классифицированный заголовок блока.
///
/// Вариант выбирается один раз по тегу формата при разборе сырых байт;
/// дальше все обращения к полям идут через типизированные методы.
#[derive(Debug, Clone)]
pub enum BlockHeader {
    M88(M88Header),
    Lite(LiteHeader),
}

impl M88Header {
    /// Часы синхронизированы
    pub fn clock_synced(&self) -> bool {
        self.sync_mode & SYNC_OK != 0
    }

    /// Время проверено по DCF
    pub fn dcf_checked(&self) -> bool {
        self.sync_mode & DCF_OK != 0
    }

    pub fn time_valid(&self) -> bool {
        self.sync_mode & TM_VALID != 0
    }
}

impl BlockHeader {
    pub fn block_format(&self) -> BlockFormat {
        match self {
            BlockHeader::M88(h) => h.block_format,
            BlockHeader::Lite(h) => h.block_format,
        }
    }

    pub fn data_format(&self) -> u8 {
        match self {
            BlockHeader::M88(h) => h.data_format,
            BlockHeader::Lite(h) => h.data_format,
        }
    }

    /// Действующая кодировка для декодирования: монитор-блоки всегда
    /// содержат прямые 16-битные слова независимо от записанного тега.
    pub fn effective_encoding(&self) -> MarsResult<SampleEncoding> {
        if self.block_format().is_monitor() {
            Ok(SampleEncoding::Linear)
        } else {
            SampleEncoding::from_u8(self.data_format())
        }
    }

    pub fn channel(&self) -> u8 {
        match self {
            BlockHeader::M88(h) => h.channel,
            BlockHeader::Lite(h) => h.channel,
        }
    }

    pub fn scale(&self) -> u8 {
        match self {
            BlockHeader::M88(h) => h.scale,
            BlockHeader::Lite(h) => h.scale,
        }
    }

    pub fn max_amplitude(&self) -> i16 {
        match self {
            BlockHeader::M88(h) => h.max_amplitude,
            BlockHeader::Lite(h) => h.max_amplitude,
        }
    }

    /// Время начала блока в секундах epoch
    pub fn timestamp(&self) -> i64 {
        match self {
            BlockHeader::M88(h) => i64::from(h.time),
            BlockHeader::Lite(h) => i64::from(h.time),
        }
    }

    /// Код интервала дискретизации (интервал = 2^N мс)
    pub fn sample_interval_code(&self) -> u8 {
        match self {
            BlockHeader::M88(h) => h.sample_rate_code,
            BlockHeader::Lite(h) => h.sample_interval_code,
        }
    }

    /// Интервал дискретизации в миллисекундах
    pub fn sample_interval_ms(&self) -> u32 {
        1u32.checked_shl(u32::from(self.sample_interval_code()))
            .unwrap_or(u32::MAX)
    }

    /// Частота дискретизации в Гц
    pub fn sample_rate_hz(&self) -> f64 {
        1000.0 / f64::from(self.sample_interval_ms())
    }

    /// Код станции: для MARS-88 — младшие 16 бит device_id в hex,
    /// для MARSlite — имя станции без хвостовых NUL.
    pub fn station_code(&self) -> String {
        match self {
            BlockHeader::M88(h) => format!("{:04X}", h.device_id & 0xFFFF),
            BlockHeader::Lite(h) => {
                let len = h
                    .station_name
                    .iter()
                    .position(|&b| b == 0)
                    .unwrap_or(h.station_name.len());
                String::from_utf8_lossy(&h.station_name[..len]).into_owned()
            }
        }
    }

    /// Серийный номер станции; у MARSlite серийника нет — возвращается 0
    pub fn station_serial(&self) -> i32 {
        match self {
            BlockHeader::M88(h) => h.device_id & 0xFFFF,
            BlockHeader::Lite(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m88_header() -> M88Header {
        M88Header {
            magic: 0x656C,
            block_format: BlockFormat::M88Data,
            data_format: 0,
            device_id: 0x0012_ABCD,
            time: 1_000_000,
            time_lag_ms: 0,
            sync_mode: SM_DCF77 | DCF_OK | SYNC_OK,
            channel: 1,
            sample_rate_code: 3,
            max_amplitude: 500,
            scale: 2,
        }
    }

    fn lite_header() -> LiteHeader {
        LiteHeader {
            magic: 0x656C,
            block_format: BlockFormat::LiteData,
            data_format: 5,
            station_name: *b"AQU\0",
            time: 2_000_000,
            channel: 0,
            sample_interval_code: 2,
            max_amplitude: 100,
            scale: 4,
            trigger_index: 0,
            diff_start: 0,
        }
    }

    #[test]
    fn test_station_code_m88_hex() {
        let h = BlockHeader::M88(m88_header());
        assert_eq!(h.station_code(), "ABCD");
        assert_eq!(h.station_serial(), 0xABCD);
    }

    #[test]
    fn test_station_code_lite_name() {
        let h = BlockHeader::Lite(lite_header());
        assert_eq!(h.station_code(), "AQU");
        assert_eq!(h.station_serial(), 0);
    }

    #[test]
    fn test_sampling_accessors() {
        let h = BlockHeader::M88(m88_header());
        // Код 3 → интервал 8 мс → 125 Гц
        assert_eq!(h.sample_interval_code(), 3);
        assert_eq!(h.sample_interval_ms(), 8);
        assert_eq!(h.sample_rate_hz(), 125.0);
    }

    #[test]
    fn test_effective_encoding_monitor_forced_linear() {
        let mut raw = m88_header();
        raw.block_format = BlockFormat::M88Monitor;
        raw.data_format = 3; // записанный тег игнорируется
        let h = BlockHeader::M88(raw);
        assert_eq!(h.effective_encoding().unwrap(), SampleEncoding::Linear);
    }

    #[test]
    fn test_effective_encoding_data_block() {
        let h = BlockHeader::Lite(lite_header());
        assert_eq!(
            h.effective_encoding().unwrap(),
            SampleEncoding::LiteFloatDiff
        );

        let mut raw = lite_header();
        raw.data_format = 6;
        assert!(BlockHeader::Lite(raw).effective_encoding().is_err());
    }

    #[test]
    fn test_sync_mode_bits() {
        let h = m88_header();
        assert!(h.clock_synced());
        assert!(h.dcf_checked());
        assert!(!h.time_valid());
    }
}
