/// Example question offered on the welcome screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub question: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        title: "Explain a rule",
        question: "What is the penalty for a deliberate foul in the circle?",
    },
    Suggestion {
        title: "Check rules",
        question: "What is rule 13.2?",
    },
    Suggestion {
        title: "Card suspensions",
        question: "How long is a green card suspension?",
    },
    Suggestion {
        title: "Quick check",
        question: "Can I hit the ball in indoor hockey?",
    },
];
