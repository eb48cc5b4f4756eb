//! Масштаб и коэффициент усиления блока.
//!
//! Масштаб — целое со знаком: отрицательное значение означает «умножить
//! сырой код на |scale|», положительное — «делить на scale». Коэффициент
//! gain — то же отношение в виде положительного числа с плавающей точкой
//! (физических единиц на код); для форматов с делением gain·scale == 1,
//! для Linear gain == |scale|.

use mars_types::{MarsError, MarsResult, SampleEncoding};

/// База показателя масштаба для форматов MARS-88
pub const M88_SCALE_BASE: i32 = 16;

/// База показателя масштаба для форматов MARSlite
pub const LITE_SCALE_BASE: i32 = 14;

fn shift_for(encoding: SampleEncoding, header_scale: u8) -> MarsResult<u32> {
    let shift = match encoding {
        SampleEncoding::Linear => i32::from(header_scale),
        SampleEncoding::M88Float2 | SampleEncoding::M88Float3 | SampleEncoding::M88Float4 => {
            M88_SCALE_BASE - i32::from(header_scale)
        }
        SampleEncoding::LiteFloat | SampleEncoding::LiteFloatDiff => {
            LITE_SCALE_BASE - i32::from(header_scale)
        }
    };

    // Вне этого диапазона 1 << shift не представим — регистратор такие
    // заголовки не пишет, нулевой масштаб наружу не отдаём
    if !(0..=30).contains(&shift) {
        return Err(MarsError::InvalidScale {
            encoding,
            header_scale,
        });
    }

    Ok(shift as u32)
}

/// Целочисленный масштаб блока.
pub fn scale_factor(encoding: SampleEncoding, header_scale: u8) -> MarsResult<i32> {
    let factor = 1i32 << shift_for(encoding, header_scale)?;

    Ok(match encoding {
        SampleEncoding::Linear => -factor,
        _ => factor,
    })
}

/// Коэффициент перевода кода в физические единицы.
pub fn gain(encoding: SampleEncoding, header_scale: u8) -> MarsResult<f64> {
    let factor = f64::from(1i32 << shift_for(encoding, header_scale)?);

    Ok(match encoding {
        SampleEncoding::Linear => factor,
        _ => 1.0 / factor,
    })
}
