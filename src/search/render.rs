use crate::search::lookup::{LookupResult, SearchState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

// NOTE: a pure function of (query, state) to displayed content; all mutation happens through the frame
pub struct Render<'a, 'b> {
    frame: &'a mut Frame<'b>,
    query: &'a str,
    state: &'a SearchState,
}

impl<'a, 'b> Render<'a, 'b> {
    const TITLE: &'static str = "JAN-URL 変換システム";
    const SUBTITLE: &'static str = "JANコードから商品URLを検索";
    const PLACEHOLDER: &'static str = "JANコードを入力 (例: 4571657070839)";
    const SEARCH_LABEL: &'static str = "enter: 検索  esc: 終了";
    const BUSY_LABEL: &'static str = "検索中...";
    const RESULT_TITLE: &'static str = "検索結果";
    const JAN_CODE_LABEL: &'static str = "JANコード:";
    const BRAND_LABEL: &'static str = "ブランド:";
    const PRODUCT_NAME_LABEL: &'static str = "商品名:";
    const URL_LABEL: &'static str = "URL:";

    pub fn new(frame: &'a mut Frame<'b>, query: &'a str, state: &'a SearchState) -> Self {
        Self { frame, query, state }
    }

    pub fn render(mut self) {
        let [title_area, subtitle_area, input_area, control_area, outcome_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(self.frame.size());
        let state = self.state;

        self.render_title(title_area);
        self.render_subtitle(subtitle_area);
        self.render_input(input_area);
        self.render_control(control_area);

        match state {
            SearchState::Idle | SearchState::Loading => {}
            SearchState::Failed(message) => self.render_error(outcome_area, message),
            SearchState::Succeeded(result) => self.render_result(outcome_area, result),
        }
    }

    fn render_title(&mut self, area: Rect) {
        self.frame.render_widget(Paragraph::new(Self::TITLE).bold().centered(), area);
    }

    fn render_subtitle(&mut self, area: Rect) {
        self.frame.render_widget(Paragraph::new(Self::SUBTITLE).dim().centered(), area);
    }

    fn render_input(&mut self, area: Rect) {
        let loading = self.state.is_loading();
        let content = if self.query.is_empty() {
            Self::PLACEHOLDER.dim()
        } else if loading {
            self.query.dim()
        } else {
            Span::raw(self.query)
        };
        let input = Paragraph::new(Line::from(content)).block(Block::bordered());

        self.frame.render_widget(input, area);

        if !loading {
            let width = u16::try_from(self.query.width()).unwrap_or(u16::MAX);
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(width)
                .min(area.right().saturating_sub(2));

            self.frame.set_cursor(x, area.y.saturating_add(1));
        }
    }

    fn render_control(&mut self, area: Rect) {
        let control = if self.state.is_loading() {
            Paragraph::new(Self::BUSY_LABEL).bold()
        } else {
            Paragraph::new(Self::SEARCH_LABEL).dim()
        };

        self.frame.render_widget(control, area);
    }

    fn render_error(&mut self, area: Rect, message: &str) {
        let banner = Paragraph::new(std::format!("⚠️ {message}")).red();

        self.frame.render_widget(banner, area);
    }

    fn render_result(&mut self, area: Rect, result: &'a LookupResult) {
        let mut lines = std::vec![Self::row(Self::JAN_CODE_LABEL, &result.jan_code)];

        if let Some(brand) = &result.brand {
            lines.push(Self::row(Self::BRAND_LABEL, brand));
        }

        if let Some(product_name) = &result.product_name {
            lines.push(Self::row(Self::PRODUCT_NAME_LABEL, product_name));
        }

        lines.push(Line::from(std::vec![
            Self::URL_LABEL.bold(),
            " ".into(),
            result.url.as_str().blue().underlined(),
        ]));

        let card = Paragraph::new(lines).block(Block::bordered().title(Self::RESULT_TITLE));

        self.frame.render_widget(card, area);
    }

    fn row(label: &'static str, value: &'a str) -> Line<'a> {
        Line::from(std::vec![label.bold(), " ".into(), value.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::any::Any;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(query: &str, state: &SearchState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();

        terminal
            .draw(|frame| Render::new(frame, query, state).render())
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut content = String::new();

        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                content.push_str(buffer.get(x, y).symbol());
            }

            content.push('\n');
        }

        content
    }

    // NOTE: wide graphemes occupy two cells, the second rendered as a space; dropping spaces makes containment checks
    // insensitive to that padding
    fn squash(content: &str) -> String {
        content.chars().filter(|chr| *chr != ' ').collect()
    }

    fn result() -> LookupResult {
        LookupResult {
            jan_code: "4571657070839".into(),
            url: "https://example.com/p/1".into(),
            brand: None,
            product_name: None,
        }
    }

    #[test]
    fn idle_shows_the_placeholder_and_no_banner_or_card() {
        let content = squash(&render_to_string("", &SearchState::Idle));

        assert!(content.contains(&squash(Render::TITLE)));
        assert!(content.contains(&squash(Render::PLACEHOLDER)));
        assert!(!content.contains('⚠'));
        assert!(!content.contains(&squash(Render::RESULT_TITLE)));
    }

    #[test]
    fn loading_shows_the_busy_label() {
        let content = squash(&render_to_string("4571657070839", &SearchState::Loading));

        assert!(content.contains(&squash(Render::BUSY_LABEL)));
        assert!(!content.contains(&squash(Render::SEARCH_LABEL)));
    }

    #[test]
    fn failed_shows_the_message_in_a_banner() {
        let content = squash(&render_to_string("4571657070839", &SearchState::Failed("not found".into())));

        assert!(content.contains('⚠'));
        assert!(content.contains(&squash("not found")));
        assert!(!content.contains(&squash(Render::RESULT_TITLE)));
    }

    #[test]
    fn succeeded_shows_the_card_without_absent_optional_fields() {
        let content = squash(&render_to_string("4571657070839", &SearchState::Succeeded(result())));

        assert!(content.contains(&squash(Render::RESULT_TITLE)));
        assert!(content.contains("4571657070839"));
        assert!(content.contains("https://example.com/p/1"));
        assert!(!content.contains(&squash(Render::BRAND_LABEL)));
        assert!(!content.contains(&squash(Render::PRODUCT_NAME_LABEL)));
    }

    #[test]
    fn succeeded_shows_present_optional_fields() {
        let result = LookupResult {
            brand: "The North Face".to_owned().some(),
            product_name: "Mountain Down Jacket".to_owned().some(),
            ..result()
        };
        let content = squash(&render_to_string("4571657070839", &SearchState::Succeeded(result)));

        assert!(content.contains(&squash(Render::BRAND_LABEL)));
        assert!(content.contains(&squash("The North Face")));
        assert!(content.contains(&squash(Render::PRODUCT_NAME_LABEL)));
        assert!(content.contains(&squash("Mountain Down Jacket")));
    }
}
