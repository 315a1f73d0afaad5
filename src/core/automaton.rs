//! Format automaton for CPF and RG documents
//!
//! A deterministic finite automaton over digits, `.`, `-` and the check
//! letter `x`. Both grammars are lenient about punctuation: every separator
//! is optional and decided on its own, but digit counts per group are exact.
//!
//! ```text
//! CPF  ddd[.]ddd[.]ddd[-]dd
//! RG    dd[.]ddd[.]ddd[-](d|x)
//! ```
//!
//! The two grammars share their unpunctuated prefix, so the first nine bare
//! digits walk a common chain of states. The first separator (or the tenth
//! digit, or an `x`) decides which family-only chain the input continues on.

use lazy_static::lazy_static;
use tracing::trace;

use super::error::{DocumentError, DocumentFamily};

/// Symbolic automaton states.
///
/// Shared-prefix states are named after the number of bare digits read.
/// Family-only states are named after the group being read and how many of
/// its digits have been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    OneDigit,
    TwoDigits,
    ThreeDigits,
    FourDigits,
    FiveDigits,
    SixDigits,
    SevenDigits,
    EightDigits,
    /// Nine bare digits: a complete RG, or a CPF still missing its check digits.
    SharedNineDigits,

    CpfFirstDot,
    CpfGroup2One,
    CpfGroup2Two,
    CpfGroup2Three,
    CpfSecondDot,
    CpfGroup3One,
    CpfGroup3Two,
    CpfGroup3Three,
    CpfHyphen,
    CpfGroup4One,
    CpfComplete,

    RgFirstDot,
    RgGroup2One,
    RgGroup2Two,
    RgGroup2Three,
    RgSecondDot,
    RgGroup3One,
    RgGroup3Two,
    RgGroup3Three,
    RgHyphen,
    RgComplete,
}

impl State {
    pub const COUNT: usize = 31;

    pub const ALL: [State; State::COUNT] = [
        State::Start,
        State::OneDigit,
        State::TwoDigits,
        State::ThreeDigits,
        State::FourDigits,
        State::FiveDigits,
        State::SixDigits,
        State::SevenDigits,
        State::EightDigits,
        State::SharedNineDigits,
        State::CpfFirstDot,
        State::CpfGroup2One,
        State::CpfGroup2Two,
        State::CpfGroup2Three,
        State::CpfSecondDot,
        State::CpfGroup3One,
        State::CpfGroup3Two,
        State::CpfGroup3Three,
        State::CpfHyphen,
        State::CpfGroup4One,
        State::CpfComplete,
        State::RgFirstDot,
        State::RgGroup2One,
        State::RgGroup2Two,
        State::RgGroup2Three,
        State::RgSecondDot,
        State::RgGroup3One,
        State::RgGroup3Two,
        State::RgGroup3Three,
        State::RgHyphen,
        State::RgComplete,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Family recognized when input ends in this state, if any.
    pub fn family(self) -> Option<DocumentFamily> {
        match self {
            State::CpfComplete => Some(DocumentFamily::Cpf),
            State::SharedNineDigits | State::RgComplete => Some(DocumentFamily::Rg),
            _ => None,
        }
    }

    pub fn is_accepting(self) -> bool {
        self.family().is_some()
    }
}

/// Input alphabet after case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Dot,
    Hyphen,
    CheckLetter,
}

impl CharClass {
    pub const COUNT: usize = 4;

    /// Class of an already folded character, `None` outside the alphabet.
    pub fn of(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(CharClass::Digit),
            '.' => Some(CharClass::Dot),
            '-' => Some(CharClass::Hyphen),
            'x' => Some(CharClass::CheckLetter),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Immutable (state, character class) → state mapping.
///
/// Missing entries mean the character is not allowed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    next: [[Option<State>; CharClass::COUNT]; State::COUNT],
}

impl TransitionTable {
    /// Build the CPF/RG transition graph.
    pub fn build() -> Self {
        let mut table = Self {
            next: [[None; CharClass::COUNT]; State::COUNT],
        };

        // Bare digits shared by both grammars, then the CPF check digits.
        table.digit_chain(&[
            State::Start,
            State::OneDigit,
            State::TwoDigits,
            State::ThreeDigits,
            State::FourDigits,
            State::FiveDigits,
            State::SixDigits,
            State::SevenDigits,
            State::EightDigits,
            State::SharedNineDigits,
            State::CpfGroup4One,
            State::CpfComplete,
        ]);

        // Leaving the shared prefix
        table.set(State::TwoDigits, CharClass::Dot, State::RgFirstDot);
        table.set(State::ThreeDigits, CharClass::Dot, State::CpfFirstDot);
        table.set(State::FiveDigits, CharClass::Dot, State::RgSecondDot);
        table.set(State::SixDigits, CharClass::Dot, State::CpfSecondDot);
        table.set(State::EightDigits, CharClass::Hyphen, State::RgHyphen);
        table.set(State::EightDigits, CharClass::CheckLetter, State::RgComplete);
        table.set(State::SharedNineDigits, CharClass::Hyphen, State::CpfHyphen);

        // CPF: ddd . ddd . ddd - dd
        table.digit_chain(&[
            State::CpfFirstDot,
            State::CpfGroup2One,
            State::CpfGroup2Two,
            State::CpfGroup2Three,
            State::CpfGroup3One,
            State::CpfGroup3Two,
            State::CpfGroup3Three,
            State::CpfGroup4One,
        ]);
        table.set(State::CpfGroup2Three, CharClass::Dot, State::CpfSecondDot);
        table.set(State::CpfSecondDot, CharClass::Digit, State::CpfGroup3One);
        table.set(State::CpfGroup3Three, CharClass::Hyphen, State::CpfHyphen);
        table.set(State::CpfHyphen, CharClass::Digit, State::CpfGroup4One);

        // RG: dd . ddd . ddd - d|x
        table.digit_chain(&[
            State::RgFirstDot,
            State::RgGroup2One,
            State::RgGroup2Two,
            State::RgGroup2Three,
            State::RgGroup3One,
            State::RgGroup3Two,
            State::RgGroup3Three,
            State::RgComplete,
        ]);
        table.set(State::RgGroup2Three, CharClass::Dot, State::RgSecondDot);
        table.set(State::RgSecondDot, CharClass::Digit, State::RgGroup3One);
        table.set(State::RgGroup3Three, CharClass::Hyphen, State::RgHyphen);
        table.set(State::RgGroup3Three, CharClass::CheckLetter, State::RgComplete);
        table.set(State::RgHyphen, CharClass::Digit, State::RgComplete);
        table.set(State::RgHyphen, CharClass::CheckLetter, State::RgComplete);

        table
    }

    fn set(&mut self, from: State, class: CharClass, to: State) {
        self.next[from.index()][class.index()] = Some(to);
    }

    fn digit_chain(&mut self, states: &[State]) {
        for pair in states.windows(2) {
            self.set(pair[0], CharClass::Digit, pair[1]);
        }
    }

    /// Next state for a folded character, `None` if no transition exists.
    pub fn next(&self, state: State, c: char) -> Option<State> {
        let class = CharClass::of(c)?;
        self.next[state.index()][class.index()]
    }

    /// Number of defined transitions.
    pub fn len(&self) -> usize {
        self.next.iter().flatten().filter(|t| t.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

lazy_static! {
    /// Process-wide table, built on first use and never mutated.
    static ref TRANSITIONS: TransitionTable = TransitionTable::build();
}

/// The shared default transition table.
pub fn default_table() -> &'static TransitionTable {
    &TRANSITIONS
}

/// States visited while classifying one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Starts with [`State::Start`]; one more entry per consumed character.
    pub states: Vec<State>,
    pub outcome: Result<DocumentFamily, DocumentError>,
}

/// Classifies documents by running them through a borrowed [`TransitionTable`].
#[derive(Debug, Clone, Copy)]
pub struct FormatClassifier<'t> {
    table: &'t TransitionTable,
}

impl<'t> FormatClassifier<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    /// Classify a document as CPF or RG.
    ///
    /// Stops at the first character without a transition and reports it
    /// (lowercased) with its 0-based character position. Input that runs
    /// out before reaching an accepting state is
    /// [`DocumentError::IncompleteOrMalformed`].
    pub fn classify(&self, document: &str) -> Result<DocumentFamily, DocumentError> {
        self.run(document, |_| {})
    }

    /// Like [`classify`](Self::classify) but records every state visited.
    pub fn trace(&self, document: &str) -> Trace {
        let mut states = vec![State::Start];
        let outcome = self.run(document, |state| states.push(state));
        Trace { states, outcome }
    }

    fn run<F>(&self, document: &str, mut visit: F) -> Result<DocumentFamily, DocumentError>
    where
        F: FnMut(State),
    {
        let mut state = State::Start;

        for (position, c) in document.chars().enumerate() {
            let character = c.to_ascii_lowercase();
            match self.table.next(state, character) {
                Some(next) => {
                    trace!(?state, ?next, %character, "transition");
                    state = next;
                    visit(state);
                }
                None => {
                    return Err(DocumentError::UnrecognizedCharacter {
                        character,
                        position,
                    })
                }
            }
        }

        state.family().ok_or(DocumentError::IncompleteOrMalformed)
    }
}

impl Default for FormatClassifier<'static> {
    fn default() -> Self {
        Self::new(default_table())
    }
}

/// Classify a document with the shared default table.
pub fn classify(document: &str) -> Result<DocumentFamily, DocumentError> {
    FormatClassifier::default().classify(document)
}
