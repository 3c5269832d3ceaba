//! Static script of the guided sequence: per-screen copy and controls.
//!
//! Keeping the screen content declarative keeps the view a dumb renderer
//! and gives the session one table to consult for button gating.

use super::sequencer::Screen;

/// Everything a user can press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Start,
    Q1Yes,
    Q1AbsolutelyYes,
    Next,
    Continue,
    What,
    Q3Obviously,
    Q3WeDo,
    Yes,
    No,
    Replay,
}

impl Button {
    /// DOM `data-action` value for dispatching clicks.
    pub fn action_id(self) -> &'static str {
        match self {
            Button::Start => "start",
            Button::Q1Yes => "q1-yes",
            Button::Q1AbsolutelyYes => "q1-abs",
            Button::Next => "next",
            Button::Continue => "continue",
            Button::What => "what",
            Button::Q3Obviously => "q3-obv",
            Button::Q3WeDo => "q3-cute",
            Button::Yes => "yes",
            Button::No => "no",
            Button::Replay => "replay",
        }
    }

    pub fn from_action_id(id: &str) -> Option<Self> {
        ALL_BUTTONS.iter().copied().find(|b| b.action_id() == id)
    }
}

const ALL_BUTTONS: [Button; 11] = [
    Button::Start,
    Button::Q1Yes,
    Button::Q1AbsolutelyYes,
    Button::Next,
    Button::Continue,
    Button::What,
    Button::Q3Obviously,
    Button::Q3WeDo,
    Button::Yes,
    Button::No,
    Button::Replay,
];

pub struct ButtonDesc {
    pub button: Button,
    pub label: &'static str,
    pub primary: bool,
}

pub struct ScreenDesc {
    pub heading: &'static str,
    pub sub: Option<&'static str>,
    pub buttons: &'static [ButtonDesc],
    /// Buttons stay inert for this long after screen entry. Landing ignores
    /// this and gates on the typewriter instead.
    pub reveal_delay_ms: f64,
}

pub fn screen_desc(screen: Screen) -> &'static ScreenDesc {
    match screen {
        Screen::Landing => &LANDING,
        Screen::Q1 => &Q1,
        Screen::Q2 => &Q2,
        Screen::Hook => &HOOK,
        Screen::Q3a => &Q3A,
        Screen::Q3b => &Q3B,
        Screen::Drumroll => &DRUMROLL,
        Screen::Proposal => &PROPOSAL,
        Screen::Finale => &FINALE,
    }
}

static LANDING: ScreenDesc = ScreenDesc {
    heading: crate::LANDING_PHRASE,
    sub: Some("Answer honestly. There's pressure oh."),
    buttons: &[ButtonDesc {
        button: Button::Start,
        label: "Start 🎀",
        primary: true,
    }],
    reveal_delay_ms: 0.0,
};

static Q1: ScreenDesc = ScreenDesc {
    heading: "Baby girl… you find me extremely sexy?",
    sub: None,
    buttons: &[
        ButtonDesc {
            button: Button::Q1Yes,
            label: "Yes",
            primary: true,
        },
        ButtonDesc {
            button: Button::Q1AbsolutelyYes,
            label: "Absolutely yes",
            primary: false,
        },
    ],
    reveal_delay_ms: 0.0,
};

static Q2: ScreenDesc = ScreenDesc {
    heading: "I know you love hearing my voice… I love hearing your voice more.",
    sub: None,
    buttons: &[ButtonDesc {
        button: Button::Next,
        label: "Next 😌",
        primary: true,
    }],
    reveal_delay_ms: 0.0,
};

static HOOK: ScreenDesc = ScreenDesc {
    heading: "\u{201c}Remember when you said I would never kiss you?\u{201d}",
    sub: Some("How's that going?"),
    buttons: &[ButtonDesc {
        button: Button::Continue,
        label: "Continue.",
        primary: false,
    }],
    reveal_delay_ms: 1300.0,
};

static Q3A: ScreenDesc = ScreenDesc {
    heading: "Okay but let me ask you something real quick…",
    sub: None,
    buttons: &[ButtonDesc {
        button: Button::What,
        label: "What?",
        primary: true,
    }],
    reveal_delay_ms: 500.0,
};

static Q3B: ScreenDesc = ScreenDesc {
    heading: "Do you think we look cute together?",
    sub: None,
    buttons: &[
        ButtonDesc {
            button: Button::Q3Obviously,
            label: "Obviously 💜",
            primary: true,
        },
        ButtonDesc {
            button: Button::Q3WeDo,
            label: "We really do",
            primary: false,
        },
    ],
    reveal_delay_ms: 0.0,
};

static DRUMROLL: ScreenDesc = ScreenDesc {
    heading: "Drum roll please…",
    sub: None,
    buttons: &[],
    reveal_delay_ms: 0.0,
};

static PROPOSAL: ScreenDesc = ScreenDesc {
    heading: crate::PROPOSAL_PROMPT,
    sub: None,
    buttons: &[
        ButtonDesc {
            button: Button::Yes,
            label: "Yes 💜",
            primary: true,
        },
        ButtonDesc {
            button: Button::No,
            label: "No 🙃",
            primary: false,
        },
    ],
    reveal_delay_ms: 0.0,
};

static FINALE: ScreenDesc = ScreenDesc {
    heading: "You just made me the happiest person alive.",
    sub: Some("I love you baby. 💜"),
    buttons: &[ButtonDesc {
        button: Button::Replay,
        label: "Replay because that was iconic. ✨",
        primary: false,
    }],
    reveal_delay_ms: 2500.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_ids_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for b in ALL_BUTTONS {
            assert!(seen.insert(b.action_id()), "duplicate id {}", b.action_id());
            assert_eq!(Button::from_action_id(b.action_id()), Some(b));
        }
        assert_eq!(Button::from_action_id("nope"), None);
    }

    #[test]
    fn every_screen_button_appears_in_its_descriptor() {
        use Screen::*;
        for (screen, expected) in [
            (Landing, vec![Button::Start]),
            (Q1, vec![Button::Q1Yes, Button::Q1AbsolutelyYes]),
            (Q2, vec![Button::Next]),
            (Hook, vec![Button::Continue]),
            (Q3a, vec![Button::What]),
            (Q3b, vec![Button::Q3Obviously, Button::Q3WeDo]),
            (Drumroll, vec![]),
            (Proposal, vec![Button::Yes, Button::No]),
            (Finale, vec![Button::Replay]),
        ] {
            let desc = screen_desc(screen);
            let got: Vec<Button> = desc.buttons.iter().map(|b| b.button).collect();
            assert_eq!(got, expected, "buttons for {screen:?}");
        }
    }
}
