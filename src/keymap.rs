//! Context-based keymap system.
//!
//! Bindings are matched against a context stack, with more specific contexts
//! winning. Example: Help > DiffView > Global

use crate::ports::{KeyCode, KeyModifiers};

/// Contexts that can be active. Forms a specificity hierarchy.
/// More specific contexts (higher discriminant) take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Always active - lowest precedence
    Global = 0,
    /// Version list has focus
    VersionList = 1,
    /// Diff comparison has focus
    DiffView = 2,
    /// Progress view has focus
    ProgressView = 3,
    /// Help overlay is shown
    Help = 4,
}

impl Context {
    /// Specificity for precedence ordering. Higher = more specific.
    pub fn specificity(self) -> u8 {
        self as u8
    }
}

/// Categories for grouping keybindings in help display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HelpCategory {
    Navigation = 0,
    Views = 1,
    Actions = 2,
    General = 3,
}

impl HelpCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            HelpCategory::Navigation => "Navigation",
            HelpCategory::Views => "Views",
            HelpCategory::Actions => "Actions",
            HelpCategory::General => "General",
        }
    }
}

/// Actions that can be triggered by key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    GotoTop,
    GotoBottom,
    OlderVersion,
    NewerVersion,

    // Views
    CompareSelected,
    CompareLatest,
    ShowProgress,
    Back,

    // Draft actions
    SaveSnapshot,
    Refresh,

    // General
    ShowHelp,
    DismissHelp,
    Quit,
}

/// A single key binding with optional context requirement.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    /// If Some, binding only active in this context. None = Global.
    pub context: Option<Context>,
    pub action: Action,
    /// Description for help display. If None, binding is hidden from help.
    pub help_text: Option<&'static str>,
    /// Category for grouping in help display.
    pub category: Option<HelpCategory>,
}

impl KeyBinding {
    pub fn new(key: KeyCode, action: Action) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::default(),
            context: None,
            action,
            help_text: None,
            category: None,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn in_context(mut self, ctx: Context) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Add help text and category for display in the help overlay.
    pub fn help(mut self, category: HelpCategory, text: &'static str) -> Self {
        self.category = Some(category);
        self.help_text = Some(text);
        self
    }
}

/// The keymap holds all bindings and dispatches key events.
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding. Later bindings take precedence at same specificity.
    pub fn bind(&mut self, binding: KeyBinding) {
        self.bindings.push(binding);
    }

    /// Look up the action for a key event given active contexts.
    /// Returns the action from the most specific matching context.
    pub fn lookup(
        &self,
        key: KeyCode,
        modifiers: KeyModifiers,
        active_contexts: &[Context],
    ) -> Option<Action> {
        let mut best_match: Option<(u8, Action)> = None;

        // Iterate in reverse so later bindings win at same specificity
        for binding in self.bindings.iter().rev() {
            if binding.key != key || binding.modifiers.ctrl != modifiers.ctrl {
                continue;
            }

            let specificity = match binding.context {
                None => 0,
                Some(ctx) => {
                    if active_contexts.contains(&ctx) {
                        ctx.specificity()
                    } else {
                        continue;
                    }
                }
            };

            match best_match {
                None => best_match = Some((specificity, binding.action)),
                Some((best_spec, _)) if specificity > best_spec => {
                    best_match = Some((specificity, binding.action));
                }
                _ => {}
            }
        }

        best_match.map(|(_, action)| action)
    }

    /// Generate help entries grouped by category.
    pub fn help_entries(&self) -> Vec<(HelpCategory, Vec<HelpEntry>)> {
        use std::collections::{BTreeMap, HashSet};

        let mut by_category: BTreeMap<HelpCategory, Vec<HelpEntry>> = BTreeMap::new();
        let mut seen_keys: HashSet<String> = HashSet::new();

        for binding in &self.bindings {
            if let (Some(category), Some(text)) = (binding.category, binding.help_text) {
                let key_display = format_key_display(&binding.key, &binding.modifiers);

                // Deduplicate by key display string (first one wins)
                if !seen_keys.insert(key_display.clone()) {
                    continue;
                }

                by_category.entry(category).or_default().push(HelpEntry {
                    key_display,
                    description: text,
                });
            }
        }

        by_category.into_iter().collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry for help display.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub key_display: String,
    pub description: &'static str,
}

fn format_key_display(key: &KeyCode, modifiers: &KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.ctrl {
        parts.push("Ctrl+".to_string());
    }

    let key_str = match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
    };

    parts.push(key_str);
    parts.concat()
}

/// Build the default keymap with all bindings.
pub fn build_default_keymap() -> Keymap {
    use HelpCategory::*;

    let mut km = Keymap::new();

    // Helper to reduce verbosity
    let key = |k: KeyCode, a: Action| KeyBinding::new(k, a);
    let ch = |c: char, a: Action| KeyBinding::new(KeyCode::Char(c), a);

    // === Navigation (shown in help) ===
    km.bind(ch('j', Action::MoveDown).help(Navigation, "Move down / scroll"));
    km.bind(ch('k', Action::MoveUp).help(Navigation, "Move up / scroll"));
    km.bind(ch('g', Action::GotoTop).help(Navigation, "Go to top"));
    km.bind(ch('G', Action::GotoBottom).help(Navigation, "Go to bottom"));

    // === Views (shown in help) ===
    km.bind(key(KeyCode::Enter, Action::CompareSelected).help(Views, "Compare selected version"));
    km.bind(ch('d', Action::CompareLatest).help(Views, "Compare latest version"));
    km.bind(ch('p', Action::ShowProgress).help(Views, "Progress & streak"));
    km.bind(key(KeyCode::Esc, Action::Back).help(Views, "Go back"));

    // === Actions (shown in help) ===
    km.bind(ch('s', Action::SaveSnapshot).help(Actions, "Save a snapshot"));
    km.bind(ch('r', Action::Refresh).help(Actions, "Reload draft from disk"));

    // === General (shown in help) ===
    km.bind(ch('?', Action::ShowHelp).help(General, "Toggle help"));
    km.bind(ch('q', Action::Quit).help(General, "Quit"));

    // === Additional bindings (not shown in help - duplicates or internal) ===
    km.bind(key(KeyCode::Down, Action::MoveDown));
    km.bind(key(KeyCode::Up, Action::MoveUp));
    km.bind(key(KeyCode::PageDown, Action::PageDown));
    km.bind(key(KeyCode::PageUp, Action::PageUp));
    km.bind(ch('c', Action::Quit).with_ctrl());

    // Diff view: n/p step through history instead of their global meaning
    km.bind(ch('n', Action::OlderVersion)
        .in_context(Context::DiffView)
        .help(Views, "Older version (in diff)"));
    km.bind(ch('p', Action::NewerVersion).in_context(Context::DiffView));
    km.bind(ch('d', Action::PageDown).with_ctrl().in_context(Context::DiffView));
    km.bind(ch('u', Action::PageUp).with_ctrl().in_context(Context::DiffView));

    // === Help mode - highest precedence for dismissal ===
    km.bind(key(KeyCode::Esc, Action::DismissHelp).in_context(Context::Help));
    km.bind(ch('?', Action::DismissHelp).in_context(Context::Help));
    km.bind(ch('q', Action::DismissHelp).in_context(Context::Help));
    km.bind(key(KeyCode::Enter, Action::DismissHelp).in_context(Context::Help));

    km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_binding() {
        let km = build_default_keymap();
        let contexts = vec![Context::Global, Context::VersionList];

        let action = km.lookup(KeyCode::Char('q'), KeyModifiers::default(), &contexts);
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_context_specific_binding() {
        let km = build_default_keymap();
        let contexts = vec![Context::Global, Context::DiffView];

        let action = km.lookup(KeyCode::Char('n'), KeyModifiers::default(), &contexts);
        assert_eq!(action, Some(Action::OlderVersion));
    }

    #[test]
    fn test_more_specific_context_wins() {
        let km = build_default_keymap();

        // In the version list, 'p' opens the progress view
        let contexts = vec![Context::Global, Context::VersionList];
        let action = km.lookup(KeyCode::Char('p'), KeyModifiers::default(), &contexts);
        assert_eq!(action, Some(Action::ShowProgress));

        // In the diff view, 'p' steps to the newer version instead
        let contexts = vec![Context::Global, Context::DiffView];
        let action = km.lookup(KeyCode::Char('p'), KeyModifiers::default(), &contexts);
        assert_eq!(action, Some(Action::NewerVersion));
    }

    #[test]
    fn test_ctrl_modifier() {
        let km = build_default_keymap();
        let contexts = vec![Context::Global, Context::DiffView];

        // 'd' without ctrl = compare latest
        let action = km.lookup(KeyCode::Char('d'), KeyModifiers::default(), &contexts);
        assert_eq!(action, Some(Action::CompareLatest));

        // Ctrl+d = page down within the diff
        let action = km.lookup(KeyCode::Char('d'), KeyModifiers::CTRL, &contexts);
        assert_eq!(action, Some(Action::PageDown));
    }

    #[test]
    fn test_help_mode_captures_quit() {
        let km = build_default_keymap();

        // In Help context, 'q' dismisses help instead of quitting
        let contexts = vec![Context::Global, Context::Help];
        let action = km.lookup(KeyCode::Char('q'), KeyModifiers::default(), &contexts);
        assert_eq!(action, Some(Action::DismissHelp));
    }

    #[test]
    fn test_help_entries_generated() {
        let km = build_default_keymap();
        let entries = km.help_entries();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].0, HelpCategory::Navigation);
        assert_eq!(entries[3].0, HelpCategory::General);

        let nav_entries = &entries[0].1;
        let move_down = nav_entries.iter().find(|e| e.key_display == "j");
        assert!(move_down.is_some());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let km = build_default_keymap();
        let contexts = vec![Context::Global, Context::VersionList];

        let action = km.lookup(KeyCode::Char('c'), KeyModifiers::CTRL, &contexts);
        assert_eq!(action, Some(Action::Quit));
    }
}
