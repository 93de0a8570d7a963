use anyhow::Result;
use calculator_suite::sports::{
    country_summary, filter_entries, sort_entries, CountrySummary, EntryFilter, SortKey, SportsEntry,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_JUMP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Countries,
    Roster,
    Views,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Countries => Page::Roster,
            Page::Roster => Page::Views,
            Page::Views => Page::Countries,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Countries => Page::Views,
            Page::Roster => Page::Countries,
            Page::Views => Page::Roster,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Countries => "Countries",
            Page::Roster => "Roster",
            Page::Views => "Views",
        }
    }
}

/// Keyboard focus: normal navigation or typing into a search box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NameSearch,
    SportSearch,
}

pub struct App {
    pub entries: Vec<SportsEntry>,
    pub filtered_entries: Vec<SportsEntry>,
    pub countries: Vec<CountrySummary>,
    pub state: TableState,
    pub countries_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub filter: EntryFilter,
    pub sort_key: SortKey,
    pub input_mode: InputMode,
    pub search_buffer: String,
}

impl App {
    pub fn new(entries: Vec<SportsEntry>) -> Self {
        let mut countries_state = TableState::default();
        countries_state.select(Some(0));

        let mut app = Self {
            countries: country_summary(&entries),
            filtered_entries: Vec::new(),
            entries,
            state: TableState::default(),
            countries_state,
            current_page: Page::Roster,
            show_detail: false,
            filter: EntryFilter::default(),
            sort_key: SortKey::default(),
            input_mode: InputMode::Normal,
            search_buffer: String::new(),
        };
        app.refresh();
        app
    }

    /// Re-run filter + sort and reset the selection
    pub fn refresh(&mut self) {
        self.filtered_entries = filter_entries(&self.entries, &self.filter);
        sort_entries(&mut self.filtered_entries, self.sort_key);

        if !self.filtered_entries.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_entry(&self) -> Option<&SportsEntry> {
        self.state.selected().and_then(|i| self.filtered_entries.get(i))
    }

    /// Add or remove a country from the filter
    pub fn toggle_country(&mut self, country: &str) {
        if let Some(pos) = self
            .filter
            .countries
            .iter()
            .position(|c| c.eq_ignore_ascii_case(country))
        {
            self.filter.countries.remove(pos);
        } else {
            self.filter.countries.push(country.to_string());
        }
        self.refresh();
    }

    pub fn toggle_selected_country(&mut self) {
        let country = self
            .countries_state
            .selected()
            .and_then(|i| self.countries.get(i))
            .map(|c| c.country.clone());
        if let Some(country) = country {
            self.toggle_country(&country);
        }
    }

    pub fn cycle_sort(&mut self) {
        self.sort_key = self.sort_key.next();
        self.refresh();
    }

    pub fn clear_filter(&mut self) {
        self.filter = EntryFilter::default();
        self.refresh();
    }

    pub fn start_search(&mut self, mode: InputMode) {
        self.search_buffer = match mode {
            InputMode::NameSearch => self.filter.name.clone().unwrap_or_default(),
            InputMode::SportSearch => self.filter.sport.clone().unwrap_or_default(),
            InputMode::Normal => String::new(),
        };
        self.input_mode = mode;
    }

    /// Apply the typed text to the active search field (live filtering)
    pub fn apply_search(&mut self) {
        let value = if self.search_buffer.trim().is_empty() {
            None
        } else {
            Some(self.search_buffer.clone())
        };
        match self.input_mode {
            InputMode::NameSearch => self.filter.name = value,
            InputMode::SportSearch => self.filter.sport = value,
            InputMode::Normal => return,
        }
        self.refresh();
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_buffer.clear();
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn active_table(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::Countries => (&mut self.countries_state, self.countries.len()),
            _ => (&mut self.state, self.filtered_entries.len()),
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.active_table();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active_table();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let (state, len) = self.active_table();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| (i + PAGE_JUMP).min(len - 1));
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let (state, len) = self.active_table();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| i.saturating_sub(PAGE_JUMP));
        state.select(Some(i));
    }

    pub fn first(&mut self) {
        let (state, len) = self.active_table();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let (state, len) = self.active_table();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }

    /// Distinct sports, most entries first (for the Views page)
    pub fn sports(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(s, _)| s.eq_ignore_ascii_case(&entry.sport)) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.sport.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }

    /// Quick view n (1-based): 1 = everything, 2.. = one sport each
    pub fn apply_view(&mut self, n: usize) {
        if n <= 1 {
            self.clear_filter();
            return;
        }
        if let Some((sport, _)) = self.sports().get(n - 2) {
            self.filter = EntryFilter {
                sport: Some(sport.clone()),
                ..Default::default()
            };
            self.refresh();
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "browser loop failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        if app.input_mode != InputMode::Normal {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => app.finish_search(),
                KeyCode::Backspace => {
                    app.search_buffer.pop();
                    app.apply_search();
                }
                KeyCode::Char(c) => {
                    app.search_buffer.push(c);
                    app.apply_search();
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Enter if app.current_page == Page::Countries => app.toggle_selected_country(),
            KeyCode::Enter => app.toggle_detail(),
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    app.previous_page();
                } else {
                    app.next_page();
                }
            }
            KeyCode::BackTab => app.previous_page(),
            KeyCode::Char('/') => {
                app.current_page = Page::Roster;
                app.start_search(InputMode::NameSearch);
            }
            KeyCode::Char('f') => {
                app.current_page = Page::Roster;
                app.start_search(InputMode::SportSearch);
            }
            KeyCode::Char('s') => app.cycle_sort(),
            KeyCode::Char('c') => {
                app.clear_filter();
                app.current_page = Page::Roster;
            }
            KeyCode::Char(d @ '1'..='9') if app.current_page == Page::Views => {
                app.apply_view(d as usize - '0' as usize);
                app.current_page = Page::Roster;
            }
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::PageDown => app.page_down(),
            KeyCode::PageUp => app.page_up(),
            KeyCode::Home => app.first(),
            KeyCode::End => app.last(),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Roster {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_roster(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Countries => render_countries(f, chunks[1], app),
            Page::Roster => render_roster(f, chunks[1], app),
            Page::Views => render_views(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Countries, Page::Roster, Page::Views];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Entries: {}", app.entries.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Countries: {}", app.countries.len()),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Sort: {}", app.sort_key.label()),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn header_row(titles: &[&str]) -> Row<'static> {
    let cells = titles
        .iter()
        .map(|h| Cell::from(h.to_string()).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn rank_color(rank: u32) -> Color {
    match rank {
        1 => Color::Yellow,
        2 => Color::White,
        3 => Color::Red,
        0 => Color::DarkGray,
        _ => Color::Gray,
    }
}

fn render_roster(f: &mut Frame, area: Rect, app: &mut App) {
    let header = header_row(&["Rank", "Name", "Country", "Sport", "Team", "Score"]);

    let rows = app.filtered_entries.iter().map(|e| {
        let rank = if e.rank == 0 { "-".to_string() } else { e.rank.to_string() };
        Row::new(vec![
            Cell::from(rank).style(Style::default().fg(rank_color(e.rank))),
            Cell::from(truncate(&e.name, 26)),
            Cell::from(truncate(&e.country, 18)),
            Cell::from(truncate(&e.sport, 16)),
            Cell::from(truncate(&e.team, 18)),
            Cell::from(format!("{:.2}", e.score)),
        ])
        .height(1)
    });

    let title = format!(" Roster ({} of {}) ", app.filtered_entries.len(), app.entries.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(28),
            Constraint::Length(20),
            Constraint::Length(18),
            Constraint::Length(20),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_countries(f: &mut Frame, area: Rect, app: &mut App) {
    let header = header_row(&["", "Country", "Entries", "Best rank"]);
    let selected = &app.filter.countries;

    let rows = app.countries.iter().map(|c| {
        let active = selected.iter().any(|s| s.eq_ignore_ascii_case(&c.country));
        let mark = if active { "✓" } else { " " };
        Row::new(vec![
            Cell::from(mark).style(Style::default().fg(Color::Green)),
            Cell::from(c.country.clone()),
            Cell::from(c.entries.to_string()),
            Cell::from(c.best_rank.map_or("-".to_string(), |r| r.to_string())),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(28),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Countries - Enter toggles filter "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.countries_state);
}

fn render_views(f: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(Color::Yellow);
    let active_sport = app.filter.sport.as_deref();

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quick Views",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   "),
            Span::styled("1", key_style),
            Span::raw(format!(". {:<28}", "All entries")),
            Span::styled(format!("{:>5}", app.entries.len()), Style::default().fg(Color::White)),
        ]),
    ];

    for (i, (sport, count)) in app.sports().iter().take(8).enumerate() {
        let marker = if active_sport.map_or(false, |s| s.eq_ignore_ascii_case(sport)) {
            Span::styled(" → ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("   ")
        };
        content.push(Line::from(vec![
            marker,
            Span::styled((i + 2).to_string(), key_style),
            Span::raw(format!(". {:<28}", truncate(sport, 28))),
            Span::styled(format!("{:>5}", count), Style::default().fg(Color::White)),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Hint: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC)),
        Span::styled(
            "number picks a view, / searches names, f searches sports, c clears",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    ]));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Views - By Sport "),
    );

    f.render_widget(paragraph, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Entry Details ");

    let Some(e) = app.selected_entry() else {
        f.render_widget(Paragraph::new("No entry selected").block(block), area);
        return;
    };

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rank = if e.rank == 0 { "unranked".to_string() } else { format!("#{}", e.rank) };

    let content = vec![
        Line::from(""),
        Line::from(vec![label("  Name: "), Span::raw(e.name.clone())]),
        Line::from(""),
        Line::from(vec![label("  Country: "), Span::raw(e.country.clone())]),
        Line::from(""),
        Line::from(vec![label("  Sport: "), Span::raw(e.sport.clone())]),
        Line::from(""),
        Line::from(vec![label("  Team: "), Span::raw(e.team.clone())]),
        Line::from(""),
        Line::from(vec![
            label("  Rank: "),
            Span::styled(rank, Style::default().fg(rank_color(e.rank))),
        ]),
        Line::from(""),
        Line::from(vec![label("  Score: "), Span::raw(format!("{:.2}", e.score))]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let status_spans = match app.input_mode {
        InputMode::NameSearch | InputMode::SportSearch => {
            let what = if app.input_mode == InputMode::NameSearch { "Name" } else { "Sport" };
            vec![
                Span::styled(format!(" {} search: ", what), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}▏", app.search_buffer), Style::default().fg(Color::White)),
                Span::raw("  | "),
                key("Enter/Esc"),
                Span::raw(" done"),
            ]
        }
        InputMode::Normal => {
            let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
            let mut spans = vec![Span::styled(
                format!(" Row: {}/{} ", selected, app.filtered_entries.len()),
                Style::default().fg(Color::Cyan),
            )];

            if !app.filter.is_empty() {
                let mut parts = Vec::new();
                if !app.filter.countries.is_empty() {
                    parts.push(app.filter.countries.join(", "));
                }
                if let Some(name) = &app.filter.name {
                    parts.push(format!("name~{}", name));
                }
                if let Some(sport) = &app.filter.sport {
                    parts.push(format!("sport~{}", sport));
                }
                spans.push(Span::raw(" | "));
                spans.push(Span::styled(
                    format!("Filter: {}", parts.join(" ")),
                    Style::default().fg(Color::Green),
                ));
                spans.push(Span::raw(" ("));
                spans.push(key("c"));
                spans.push(Span::raw(" clear)"));
            }

            spans.extend([
                Span::raw(" | "),
                key("Enter"),
                Span::raw(" Details | "),
                key("Tab"),
                Span::raw(" Page | "),
                key("s"),
                Span::raw(" Sort | "),
                key("/"),
                Span::raw(" Search | "),
                Span::styled("q", Style::default().fg(Color::Red)),
                Span::raw(" Quit"),
            ]);
            spans
        }
    };

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, country: &str, sport: &str, rank: u32) -> SportsEntry {
        SportsEntry {
            name: name.to_string(),
            country: country.to_string(),
            sport: sport.to_string(),
            team: String::new(),
            rank,
            score: rank as f64,
        }
    }

    fn app() -> App {
        App::new(vec![
            entry("Ana", "Brazil", "Football", 2),
            entry("Bo", "Sweden", "Football", 1),
            entry("Cy", "Brazil", "Judo", 3),
        ])
    }

    #[test]
    fn test_starts_unfiltered_and_sorted_by_rank() {
        let app = app();
        assert_eq!(app.filtered_entries.len(), 3);
        assert_eq!(app.selected_entry().unwrap().name, "Bo");
    }

    #[test]
    fn test_toggle_country_twice_restores_all() {
        let mut app = app();
        app.toggle_country("brazil");
        assert_eq!(app.filtered_entries.len(), 2);
        app.toggle_country("Brazil");
        assert_eq!(app.filtered_entries.len(), 3);
    }

    #[test]
    fn test_live_name_search() {
        let mut app = app();
        app.start_search(InputMode::NameSearch);
        app.search_buffer.push_str("cy");
        app.apply_search();
        app.finish_search();

        assert_eq!(app.filtered_entries.len(), 1);
        assert_eq!(app.filter.name.as_deref(), Some("cy"));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_views_by_sport() {
        let mut app = app();
        assert_eq!(app.sports()[0], ("Football".to_string(), 2));
        app.apply_view(3);
        assert_eq!(app.filtered_entries.len(), 1);
        app.apply_view(1);
        assert_eq!(app.filtered_entries.len(), 3);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous();
        assert_eq!(app.state.selected(), Some(2));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
        app.page_down();
        assert_eq!(app.state.selected(), Some(2));
    }
}
