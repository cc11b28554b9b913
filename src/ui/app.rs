use std::mem;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;
use tracing::{error, warn};

use crate::db::Store;

use super::forms::{RecipeField, RecipeForm, ReviewField, ReviewForm};
use super::helpers::{centered_rect, format_rating, single_line, surface_error};
use super::screens::{RecipeDetail, RecipeListScreen, SummaryPane, SummaryScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the tab strip at the top of the window.
const TABS_HEIGHT: u16 = 3;
/// Rows moved by PageUp/PageDown.
const PAGE: isize = 10;

/// The two tabs of the main window.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Screen {
    Recipes,
    Summary,
}

impl Screen {
    const TITLES: [&'static str; 2] = ["Recipes", "Summary"];

    fn index(self) -> usize {
        match self {
            Screen::Recipes => 0,
            Screen::Summary => 1,
        }
    }

    fn toggle(self) -> Self {
        match self {
            Screen::Recipes => Screen::Summary,
            Screen::Summary => Screen::Recipes,
        }
    }
}

/// Fine-grained modes layered over the current tab.
enum Mode {
    Normal,
    Searching(SearchState),
    AddingRecipe(RecipeForm),
    ViewingRecipe(RecipeDetail),
    AddingReview {
        detail: RecipeDetail,
        form: ReviewForm,
    },
}

/// State for the live recipe search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Store,
    screen: Screen,
    recipes: RecipeListScreen,
    summary: SummaryScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Load both tabs from the store.
    pub fn new(store: Store) -> Result<Self> {
        let recipes = RecipeListScreen::load(&store)?;
        let summary = SummaryScreen::load(&store)?;
        Ok(Self {
            store,
            screen: Screen::Recipes,
            recipes,
            summary,
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Route a key press to the active mode. Returns `true` when the user
    /// asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
            Mode::AddingRecipe(form) => self.handle_add_recipe(code, form)?,
            Mode::ViewingRecipe(detail) => self.handle_detail(code, detail)?,
            Mode::AddingReview { detail, form } => self.handle_add_review(code, detail, form)?,
        };

        Ok(exit)
    }

    /// Key press with modifiers. Alt+Enter breaks the line in the add-recipe
    /// form; everything else goes through [`App::handle_key`].
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Enter && key.modifiers.contains(KeyModifiers::ALT) {
            if let Mode::AddingRecipe(form) = &mut self.mode {
                if form.insert_newline() {
                    form.error = None;
                }
                return Ok(false);
            }
        }
        self.handle_key(key.code)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.screen = self.screen.toggle();
                return Ok(Mode::Normal);
            }
            KeyCode::Char('1') => {
                self.screen = Screen::Recipes;
                return Ok(Mode::Normal);
            }
            KeyCode::Char('2') => {
                self.screen = Screen::Summary;
                return Ok(Mode::Normal);
            }
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingRecipe(RecipeForm::default()));
            }
            _ => {}
        }

        match self.screen {
            Screen::Recipes => match code {
                KeyCode::Up => self.recipes.move_selection(-1),
                KeyCode::Down => self.recipes.move_selection(1),
                KeyCode::PageUp => self.recipes.move_selection(-PAGE),
                KeyCode::PageDown => self.recipes.move_selection(PAGE),
                KeyCode::Home => self.recipes.select_first(),
                KeyCode::End => self.recipes.select_last(),
                KeyCode::Char('/') | KeyCode::Char('f') => {
                    self.clear_status();
                    let query = self.recipes.filter.clone().unwrap_or_default();
                    return Ok(Mode::Searching(SearchState { query }));
                }
                KeyCode::Esc => {
                    if self.recipes.filter.is_some() {
                        self.recipes.set_filter(&self.store, None)?;
                        self.set_status("Search cleared.", StatusKind::Info);
                    }
                }
                KeyCode::Enter => {
                    if let Some(recipe) = self.recipes.current_recipe() {
                        let id = recipe.id;
                        match RecipeDetail::load(&self.store, id) {
                            Ok(detail) => return Ok(Mode::ViewingRecipe(detail)),
                            Err(err) => self.report_error(&err),
                        }
                    } else {
                        self.set_status("No recipe selected.", StatusKind::Error);
                    }
                }
                _ => {}
            },
            Screen::Summary => match code {
                KeyCode::Up => self.summary.move_selection(-1),
                KeyCode::Down => self.summary.move_selection(1),
                KeyCode::PageUp => self.summary.move_selection(-PAGE),
                KeyCode::PageDown => self.summary.move_selection(PAGE),
                KeyCode::Home => self.summary.select_first(),
                KeyCode::End => self.summary.select_last(),
                KeyCode::Left | KeyCode::Right => self.summary.toggle_pane(),
                _ => {}
            },
        }

        Ok(Mode::Normal)
    }

    /// Every edit of the query re-runs the store search immediately.
    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.recipes.set_filter(&self.store, None)?;
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let count = self.recipes.recipes.len();
                self.set_status(format!("{count} recipes match."), StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Up => self.recipes.move_selection(-1),
            KeyCode::Down => self.recipes.move_selection(1),
            KeyCode::PageUp => self.recipes.move_selection(-PAGE),
            KeyCode::PageDown => self.recipes.move_selection(PAGE),
            KeyCode::Backspace => {
                state.query.pop();
                self.recipes
                    .set_filter(&self.store, Some(state.query.clone()))?;
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
                self.recipes
                    .set_filter(&self.store, Some(state.query.clone()))?;
            }
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    fn handle_add_recipe(&mut self, code: KeyCode, mut form: RecipeForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add recipe cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_recipe(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    warn!(error = %message, "recipe rejected");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingRecipe(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_detail(&mut self, code: KeyCode, mut detail: RecipeDetail) -> Result<Mode> {
        let last_line = detail_lines(&detail).len().saturating_sub(1);
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Up => detail.scroll_by(-1, last_line),
            KeyCode::Down => detail.scroll_by(1, last_line),
            KeyCode::PageUp => detail.scroll_by(-(PAGE as i32), last_line),
            KeyCode::PageDown => detail.scroll_by(PAGE as i32, last_line),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let users = self.store.list_users()?;
                if users.is_empty() {
                    self.set_status("Add a user before writing reviews.", StatusKind::Error);
                } else {
                    self.clear_status();
                    return Ok(Mode::AddingReview {
                        detail,
                        form: ReviewForm::new(users),
                    });
                }
            }
            _ => {}
        }
        Ok(Mode::ViewingRecipe(detail))
    }

    fn handle_add_review(
        &mut self,
        code: KeyCode,
        detail: RecipeDetail,
        mut form: ReviewForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Review cancelled.", StatusKind::Info);
                return Ok(Mode::ViewingRecipe(detail));
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left if form.active == ReviewField::Reviewer => form.cycle_user(-1),
            KeyCode::Right if form.active == ReviewField::Reviewer => form.cycle_user(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_review(detail.recipe.id, &form) {
                Ok(updated) => return Ok(Mode::ViewingRecipe(updated)),
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingReview { detail, form })
    }

    fn save_new_recipe(&mut self, form: &RecipeForm) -> Result<()> {
        let recipe = form.parse_inputs()?;
        let id = self.store.add_recipe(&recipe)?;
        self.reload()?;
        if !self.recipes.focus(id) {
            // The new recipe is hidden by the active search; drop the filter
            // so the user can see what they just added.
            self.recipes.set_filter(&self.store, None)?;
            self.recipes.focus(id);
        }
        self.screen = Screen::Recipes;
        self.set_status(format!("Added {}.", recipe.name), StatusKind::Info);
        Ok(())
    }

    fn save_review(&mut self, recipe_id: i64, form: &ReviewForm) -> Result<RecipeDetail> {
        let (user_id, rating, comment) = form.parse_inputs()?;
        self.store.add_review(user_id, recipe_id, rating, &comment)?;
        self.set_status("Review saved.", StatusKind::Info);
        RecipeDetail::load(&self.store, recipe_id)
    }

    fn reload(&mut self) -> Result<()> {
        self.recipes.refresh(&self.store)?;
        self.summary.refresh(&self.store)
    }

    fn report_error(&mut self, err: &anyhow::Error) {
        error!(error = %format!("{err:#}"), "operation failed");
        self.set_status(surface_error(err), StatusKind::Error);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TABS_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tabs(frame, chunks[0]);
        match self.screen {
            Screen::Recipes => self.draw_recipe_tab(frame, chunks[1]),
            Screen::Summary => self.draw_summary_tab(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::AddingRecipe(form) => self.draw_recipe_form(frame, area, form),
            Mode::ViewingRecipe(detail) => self.draw_detail(frame, area, detail),
            Mode::AddingReview { detail, form } => {
                self.draw_detail(frame, area, detail);
                self.draw_review_form(frame, area, form);
            }
            Mode::Normal | Mode::Searching(_) => {}
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(Screen::TITLES.to_vec())
            .select(self.screen.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Cooking Recipe Portal"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_recipe_tab(&self, frame: &mut Frame, area: Rect) {
        let searching = match &self.mode {
            Mode::Searching(state) => Some(state.query.as_str()),
            _ => None,
        };
        let query = searching.or(self.recipes.filter.as_deref());

        let table_area = if let Some(query) = query {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(area);
            self.draw_search_bar(frame, chunks[0], query, searching.is_some());
            chunks[1]
        } else {
            area
        };

        let title = format!("Recipe List ({})", self.recipes.recipes.len());
        if self.recipes.recipes.is_empty() {
            let message = if query.is_some() {
                "No recipes match the search."
            } else {
                "No recipes yet. Press '+' to add one."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(paragraph, table_area);
            return;
        }

        let header = header_row(&["Name", "Cuisine", "Type", "Prep Time", "Difficulty", "Rating"]);
        let rows = self.recipes.recipes.iter().map(|recipe| {
            Row::new(vec![
                Cell::from(recipe.name.clone()),
                Cell::from(recipe.cuisine.clone()),
                Cell::from(recipe.dish_type.clone()),
                Cell::from(recipe.prep_time.clone()),
                Cell::from(recipe.difficulty.to_string()),
                Cell::from(format_rating(recipe.rating)),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(14),
                Constraint::Percentage(16),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(12),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(highlight_style());

        let mut state = TableState::default().with_selected(Some(self.recipes.selected));
        frame.render_stateful_widget(table, table_area, &mut state);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, query: &str, editing: bool) {
        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {query}"))).block(block.clone());
        frame.render_widget(paragraph, area);

        if editing {
            let inner = block.inner(area);
            let cursor_x = inner.x + "Search: ".len() as u16 + query.chars().count() as u16;
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_summary_tab(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let recipe_rows = self.summary.recipes.iter().map(|recipe| {
            Row::new(vec![
                Cell::from(recipe.name.clone()),
                Cell::from(recipe.cuisine.clone()),
                Cell::from(recipe.difficulty.to_string()),
                Cell::from(single_line(&recipe.method)),
            ])
        });
        let recipes = Table::new(
            recipe_rows,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(12),
                Constraint::Percentage(10),
                Constraint::Percentage(56),
            ],
        )
        .header(header_row(&["Name", "Cuisine", "Difficulty", "Method"]))
        .block(pane_block("Recipes", self.summary.pane == SummaryPane::Recipes))
        .row_highlight_style(highlight_style());

        let ingredient_rows = self.summary.ingredients.iter().map(|ingredient| {
            Row::new(vec![
                Cell::from(ingredient.name.clone()),
                Cell::from(ingredient.stock_quantity.clone().unwrap_or_else(|| "-".into())),
            ])
        });
        let materials = Table::new(
            ingredient_rows,
            [Constraint::Percentage(50), Constraint::Percentage(50)],
        )
        .header(header_row(&["Ingredient", "Quantity in Stock"]))
        .block(pane_block(
            "Materials & Quantity",
            self.summary.pane == SummaryPane::Materials,
        ))
        .row_highlight_style(highlight_style());

        let mut recipe_state = TableState::default();
        let mut ingredient_state = TableState::default();
        match self.summary.pane {
            SummaryPane::Recipes => recipe_state.select(Some(self.summary.recipe_selected)),
            SummaryPane::Materials => {
                ingredient_state.select(Some(self.summary.ingredient_selected))
            }
        }
        frame.render_stateful_widget(recipes, chunks[0], &mut recipe_state);
        frame.render_stateful_widget(materials, chunks[1], &mut ingredient_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.mode, self.screen) {
            (Mode::Searching(_), _) => &[
                ("[type]", " Filter   "),
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Keep   "),
                ("[Esc]", " Clear"),
            ],
            (Mode::AddingRecipe(_), _) => &[
                ("[Tab]", " Next field   "),
                ("[Alt+Enter]", " New line   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (Mode::ViewingRecipe(_), _) => &[
                ("[↑↓]", " Scroll   "),
                ("[r]", " Review   "),
                ("[Esc]", " Close"),
            ],
            (Mode::AddingReview { .. }, _) => &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Reviewer   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (Mode::Normal, Screen::Recipes) => &[
                ("[↑↓]", " Navigate   "),
                ("[/]", " Search   "),
                ("[Enter]", " Details   "),
                ("[+]", " Add Recipe   "),
                ("[Tab]", " Summary   "),
                ("[q]", " Quit"),
            ],
            (Mode::Normal, Screen::Summary) => &[
                ("[↑↓]", " Navigate   "),
                ("[←→]", " Switch table   "),
                ("[+]", " Add Recipe   "),
                ("[Tab]", " Recipes   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_recipe_form(&self, frame: &mut Frame, area: Rect, form: &RecipeForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add New Recipe").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = RecipeField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(row) = RecipeField::ALL.iter().position(|f| *f == form.active) {
            let prefix = form.active.label().len() as u16 + 2;
            let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
            frame.set_cursor_position((cursor_x, inner.y + row as u16));
        }
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &RecipeDetail) {
        let popup_area = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(detail_lines(detail))
            .block(Block::default().borders(Borders::ALL).title("Recipe"))
            .wrap(Wrap { trim: false })
            .scroll((detail.scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_review_form(&self, frame: &mut Frame, area: Rect, form: &ReviewForm) {
        let popup_area = centered_rect(60, 35, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Review").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(ReviewField::Reviewer),
            form.build_line(ReviewField::Rating),
            form.build_line(ReviewField::Comment),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Rating 1-5 • Enter to save • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (prefix, row) = match form.active {
            ReviewField::Reviewer => return,
            ReviewField::Rating => ("Rating: ".len(), 1),
            ReviewField::Comment => ("Comment: ".len(), 2),
        };
        let cursor_x = inner.x + prefix as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }
}

/// Text of the detail popup, one entry per line before wrapping.
fn detail_lines(detail: &RecipeDetail) -> Vec<Line<'static>> {
    let recipe = &detail.recipe;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(recipe.name.clone(), bold),
            Span::raw(format!("  •  {} ★", format_rating(recipe.rating))),
        ]),
        Line::from(format!(
            "{} • {} • {} • {}",
            recipe.cuisine, recipe.dish_type, recipe.prep_time, recipe.difficulty
        )),
        Line::from(""),
        Line::from(Span::styled("Method", bold)),
    ];
    lines.extend(recipe.method.lines().map(|line| Line::from(line.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Ingredients", bold)));

    if detail.ingredients.is_empty() {
        lines.push(Line::from(Span::styled(
            "No ingredients linked.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for item in &detail.ingredients {
        let text = match &item.quantity {
            Some(quantity) => format!("• {} ({quantity})", item.name),
            None => format!("• {}", item.name),
        };
        lines.push(Line::from(text));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Reviews ({})", detail.reviews.len()),
        bold,
    )));
    for review in &detail.reviews {
        let reviewer = review
            .reviewer
            .clone()
            .unwrap_or_else(|| format!("user #{}", review.user_id));
        lines.push(Line::from(vec![
            Span::styled(
                "★".repeat(review.rating.clamp(0, 5) as usize),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(" {reviewer}: {}", review.comment)),
        ]));
    }
    lines
}

fn header_row(titles: &[&str]) -> Row<'static> {
    Row::new(titles.iter().map(|title| Cell::from(title.to_string())))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::REVERSED)
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string());
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}
