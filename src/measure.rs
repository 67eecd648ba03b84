use crate::ast::Column;
use unicode_width::UnicodeWidthStr;

/// Column widths of a `CREATE TABLE` body, measured in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMetrics {
    pub name_width: usize,
    pub type_width: usize,
}

impl ColumnMetrics {
    pub fn measure(columns: &[Column]) -> Self {
        columns.iter().fold(Self::default(), |m, col| Self {
            name_width: m.name_width.max(text_width(&col.name)),
            type_width: m.type_width.max(text_width(&col.typ)),
        })
    }

    /// Spaces needed after `name` so the type field starts aligned.
    pub fn name_padding(&self, name: &str) -> usize {
        self.name_width.saturating_sub(text_width(name))
    }

    pub fn type_padding(&self, typ: &str) -> usize {
        self.type_width.saturating_sub(text_width(typ))
    }
}

pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(text_width("name"), 4);
    }

    #[test]
    fn test_unicode_width() {
        // 全角文字は幅2
        assert_eq!(text_width("名前"), 4);
    }

    #[test]
    fn test_measure() {
        let columns = vec![
            Column::new("id", "INTEGER"),
            Column::new("name", "text"),
            Column::new("bio", "text"),
        ];
        let m = ColumnMetrics::measure(&columns);
        assert_eq!(m.name_width, 4);
        assert_eq!(m.type_width, 7);
        assert_eq!(m.name_padding("id"), 2);
        assert_eq!(m.type_padding("text"), 3);
        assert_eq!(m.type_padding("INTEGER"), 0);
    }

    #[test]
    fn test_measure_empty() {
        assert_eq!(ColumnMetrics::measure(&[]), ColumnMetrics::default());
    }
}
