/// Результат декодирования одного блока: 500 отсчётов плюс масштаб.
///
/// Создаётся заново на каждый вызов декодера и принадлежит вызывающему;
/// никакого состояния между блоками не сохраняется.
#[derive(Debug, Clone)]
pub struct DecodedSamples {
    /// 500 знаковых отсчётов в сырых кодах АЦП
    pub samples: Vec<i32>,
    /// Масштаб: отрицательный — умножать на |scale|, положительный — делить
    pub scale: i32,
    /// Коэффициент перевода кода в физические единицы (мкВ на код)
    pub gain: f64,
}

impl DecodedSamples {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Отсчёты в физических единицах (код × gain)
    pub fn physical_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|&s| f64::from(s) * self.gain)
    }
}
