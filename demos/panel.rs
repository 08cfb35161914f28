use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::pin::pin;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

use tui_rulepanel::{
    Dimension, NotificationRuleItem, PanelGlyphs, Rgba, RuleModel, RulePanel, RulePanelView,
    SemanticColor, ThemeRegistry, ThemeSource,
};

struct StaticModel {
    items: Vec<NotificationRuleItem>,
}

impl RuleModel for StaticModel {
    type Error = Infallible;

    async fn resolve(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn notification_items(&self) -> &[NotificationRuleItem] {
        &self.items
    }
}

struct DemoTheme;

impl ThemeSource for DemoTheme {
    fn color(&self, color: SemanticColor) -> Option<Rgba> {
        match color {
            SemanticColor::Foreground => Some(Rgba::opaque(221, 227, 235)),
            SemanticColor::WorkbenchBackground | SemanticColor::EditorBackground => {
                Some(Rgba::opaque(24, 28, 36))
            }
            SemanticColor::ListActiveSelectionForeground => Some(Rgba::opaque(255, 255, 255)),
            SemanticColor::ListActiveSelectionBackground => Some(Rgba::opaque(52, 66, 96)),
            SemanticColor::ListHighlightForeground => Some(Rgba::opaque(136, 192, 208)),
            _ => None,
        }
    }
}

fn demo_rules() -> Vec<NotificationRuleItem> {
    vec![
        NotificationRuleItem::new("Release notes available", "", false),
        NotificationRuleItem::new("Workspace contains unsaved files", "editorIsDirty", true),
        NotificationRuleItem::new(
            "Extension recommends a reload",
            "extensionHostRestarted",
            true,
        ),
        NotificationRuleItem::new("Telemetry is enabled", "telemetryEnabled && !firstRun", false),
        NotificationRuleItem::new("Large file optimizations active", "fileSize > 50mb", true),
    ]
}

// The static model resolves without suspending; one poll completes the render.
fn block_on_ready<F: Future>(future: F) -> F::Output {
    let mut future = pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    match future.as_mut().poll(&mut cx) {
        Poll::Ready(output) => output,
        Poll::Pending => unreachable!("static model resolves synchronously"),
    }
}

fn draw(frame: &mut Frame, panel: &mut RulePanel, registry: &ThemeRegistry) {
    let area = frame.area();
    // Terminal cells mapped onto the px-based layout contract: 8 px per cell
    // horizontally, one 24 px row per line.
    panel.layout(Dimension::new(
        f32::from(area.width) * 8.0,
        f32::from(area.height) * 24.0,
    ));
    frame.render_stateful_widget(
        RulePanelView::new(registry).glyphs(PanelGlyphs::unicode()),
        area,
        panel,
    );
}

fn run_app(
    mut terminal: DefaultTerminal,
    panel: &mut RulePanel,
    registry: &ThemeRegistry,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, panel, registry))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {
                        panel.list_mut().handle_key(key);
                    }
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    let mut registry = ThemeRegistry::new();
    registry.init(&DemoTheme);

    let mut model = StaticModel {
        items: demo_rules(),
    };
    let mut panel = RulePanel::new();
    panel.create_editor();
    block_on_ready(panel.render(&mut model)).unwrap();
    panel.select_index(0);

    let terminal = ratatui::init();
    let result = run_app(terminal, &mut panel, &registry);
    ratatui::restore();
    panel.dispose();
    result
}
