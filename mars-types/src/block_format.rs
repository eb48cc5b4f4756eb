/// Тег формата блока (байт 2 заголовка)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockFormat {
    /// Блок данных MARS-88
    M88Data = 1,
    /// Монитор-блок MARS-88 (состояние прибора)
    M88Monitor = 2,
    /// Блок данных MARSlite
    LiteData = 3,
    /// Монитор-блок MARSlite
    LiteMonitor = 4,
}

impl BlockFormat {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(BlockFormat::M88Data),
            2 => Some(BlockFormat::M88Monitor),
            3 => Some(BlockFormat::LiteData),
            4 => Some(BlockFormat::LiteMonitor),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Блок с сейсмическими данными (а не монитор-блок)
    pub fn is_data(&self) -> bool {
        matches!(self, BlockFormat::M88Data | BlockFormat::LiteData)
    }

    /// Монитор-блоки всегда декодируются как прямые 16-битные слова
    pub fn is_monitor(&self) -> bool {
        matches!(self, BlockFormat::M88Monitor | BlockFormat::LiteMonitor)
    }

    /// Вариант заголовка MARS-88 (24 байта, dev_id + sync-поля)
    pub fn is_m88(&self) -> bool {
        matches!(self, BlockFormat::M88Data | BlockFormat::M88Monitor)
    }

    /// Вариант заголовка MARSlite (24 байта, имя станции + diff_start)
    pub fn is_lite(&self) -> bool {
        matches!(self, BlockFormat::LiteData | BlockFormat::LiteMonitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_known_tags() {
        assert_eq!(BlockFormat::from_u8(1), Some(BlockFormat::M88Data));
        assert_eq!(BlockFormat::from_u8(2), Some(BlockFormat::M88Monitor));
        assert_eq!(BlockFormat::from_u8(3), Some(BlockFormat::LiteData));
        assert_eq!(BlockFormat::from_u8(4), Some(BlockFormat::LiteMonitor));
    }

    #[test]
    fn test_from_u8_unknown_tags() {
        assert_eq!(BlockFormat::from_u8(0), None);
        assert_eq!(BlockFormat::from_u8(5), None);
        assert_eq!(BlockFormat::from_u8(255), None);
    }

    #[test]
    fn test_families() {
        assert!(BlockFormat::M88Data.is_data());
        assert!(BlockFormat::LiteData.is_data());
        assert!(BlockFormat::M88Monitor.is_monitor());
        assert!(BlockFormat::LiteMonitor.is_monitor());

        assert!(BlockFormat::M88Data.is_m88());
        assert!(BlockFormat::M88Monitor.is_m88());
        assert!(BlockFormat::LiteData.is_lite());
        assert!(BlockFormat::LiteMonitor.is_lite());
    }
}
