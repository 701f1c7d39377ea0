use dlg_core::NBSP;

/// Output target for revealed nodes. Hosts without a dialogue area simply
/// hand the director no surface at all.
pub trait RenderSurface {
    fn clear(&mut self);
    fn set_line_effect(&mut self, effect: Option<&str>);
    fn append_char(&mut self, ch: char, classes: &[String]);
    fn append_breaks(&mut self, count: u32);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledChar {
    pub ch: char,
    pub classes: Vec<String>,
}

/// In-memory surface holding revealed rows, used by the terminal host and by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSurface {
    rows: Vec<Vec<StyledChar>>,
    line_effect: Option<String>,
}

impl Default for TextSurface {
    fn default() -> Self {
        Self {
            rows: vec![Vec::new()],
            line_effect: None,
        }
    }
}

impl TextSurface {
    pub fn rows(&self) -> &[Vec<StyledChar>] {
        &self.rows
    }

    pub fn line_effect(&self) -> Option<&str> {
        self.line_effect.as_deref()
    }

    pub fn char_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|styled| if styled.ch == NBSP { ' ' } else { styled.ch })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl RenderSurface for TextSurface {
    fn clear(&mut self) {
        self.rows = vec![Vec::new()];
        self.line_effect = None;
    }

    fn set_line_effect(&mut self, effect: Option<&str>) {
        self.line_effect = effect.map(|name| format!("effect-{}", name));
    }

    fn append_char(&mut self, ch: char, classes: &[String]) {
        let styled = StyledChar {
            ch,
            classes: classes.to_vec(),
        };
        match self.rows.last_mut() {
            Some(row) => row.push(styled),
            None => self.rows.push(vec![styled]),
        }
    }

    fn append_breaks(&mut self, count: u32) {
        for _ in 0..count {
            self.rows.push(Vec::new());
        }
    }
}

#[cfg(test)]
mod surface_tests {
    use super::*;

    #[test]
    fn breaks_open_new_rows_and_clear_resets() {
        let mut surface = TextSurface::default();
        surface.set_line_effect(Some("glitch"));
        surface.append_char('a', &["char".to_string()]);
        surface.append_breaks(2);
        surface.append_char(NBSP, &["char".to_string()]);
        surface.append_char('b', &["char".to_string()]);
        assert_eq!(surface.plain_text(), "a\n\n b");
        assert_eq!(surface.line_effect(), Some("effect-glitch"));
        assert_eq!(surface.char_count(), 3);

        surface.clear();
        assert_eq!(surface.plain_text(), "");
        assert_eq!(surface.line_effect(), None);
    }
}
