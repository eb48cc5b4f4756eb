use crate::{MarsError, MarsResult};

/// Кодировка 16-битных слов данных (байт 3 заголовка)
///
/// Значения совпадают с тегами DSP регистраторов MARS. Варианты 1–3
/// используются MARS-88, варианты 4–5 — MARSlite; вариант 0 общий.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SampleEncoding {
    /// Прямое 16-битное слово
    Linear = 0,
    /// 14 бит мантиссы, 2 бита экспоненты (MARS-88)
    M88Float2 = 1,
    /// 13 бит мантиссы, 3 бита экспоненты (MARS-88)
    M88Float3 = 2,
    /// 12 бит мантиссы, 4 бита экспоненты (MARS-88)
    M88Float4 = 3,
    /// 13 бит мантиссы, 3 бита экспоненты/2, абсолютные значения (MARSlite)
    LiteFloat = 4,
    /// Как LiteFloat, но слово кодирует разность с предыдущим отсчётом
    LiteFloatDiff = 5,
}

impl SampleEncoding {
    pub fn from_u8(v: u8) -> MarsResult<Self> {
        match v {
            0 => Ok(SampleEncoding::Linear),
            1 => Ok(SampleEncoding::M88Float2),
            2 => Ok(SampleEncoding::M88Float3),
            3 => Ok(SampleEncoding::M88Float4),
            4 => Ok(SampleEncoding::LiteFloat),
            5 => Ok(SampleEncoding::LiteFloatDiff),
            _ => Err(MarsError::UnsupportedEncoding(v)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Число младших бит слова, занятых экспонентой
    pub fn exponent_bits(&self) -> u32 {
        match self {
            SampleEncoding::Linear => 0,
            SampleEncoding::M88Float2 => 2,
            SampleEncoding::M88Float3 => 3,
            SampleEncoding::M88Float4 => 4,
            SampleEncoding::LiteFloat | SampleEncoding::LiteFloatDiff => 3,
        }
    }

    /// Маска экспоненты; мантисса — слово с очищенными битами маски
    pub fn exponent_mask(&self) -> i16 {
        ((1u16 << self.exponent_bits()) - 1) as i16
    }

    /// Требует ли кодировка восстановления бегущей суммой
    pub fn is_differential(&self) -> bool {
        matches!(self, SampleEncoding::LiteFloatDiff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_round_trip() {
        for v in 0..=5u8 {
            let enc = SampleEncoding::from_u8(v).unwrap();
            assert_eq!(enc.as_u8(), v);
        }
    }

    #[test]
    fn test_from_u8_out_of_range() {
        for v in [6u8, 7, 16, 255] {
            match SampleEncoding::from_u8(v) {
                Err(MarsError::UnsupportedEncoding(got)) => assert_eq!(got, v),
                other => panic!("expected UnsupportedEncoding, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_exponent_metadata() {
        assert_eq!(SampleEncoding::Linear.exponent_bits(), 0);
        assert_eq!(SampleEncoding::Linear.exponent_mask(), 0);
        assert_eq!(SampleEncoding::M88Float2.exponent_mask(), 0x03);
        assert_eq!(SampleEncoding::M88Float3.exponent_mask(), 0x07);
        assert_eq!(SampleEncoding::M88Float4.exponent_mask(), 0x0F);
        assert_eq!(SampleEncoding::LiteFloat.exponent_mask(), 0x07);
        assert_eq!(SampleEncoding::LiteFloatDiff.exponent_mask(), 0x07);
    }

    #[test]
    fn test_differential_flag() {
        assert!(SampleEncoding::LiteFloatDiff.is_differential());
        assert!(!SampleEncoding::LiteFloat.is_differential());
        assert!(!SampleEncoding::Linear.is_differential());
    }
}
