//! Confirmation gate for destructive actions.
//!
//! Destructive client calls take a [`Confirmed`] token. The only ways to
//! get one are an affirmative answer from a [`Confirmer`] or from a
//! non-blocking dialog via [`Confirmed::from_answer`], so a declined
//! confirmation cannot reach the backend.

/// Proof that the user affirmatively confirmed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed {
    _private: (),
}

impl Confirmed {
    pub fn from_answer(answer: bool) -> Option<Self> {
        answer.then_some(Confirmed { _private: () })
    }
}

/// Something that can ask the user a yes/no question.
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// Ask `confirmer`; `None` means the action must not run.
pub fn confirm<C: Confirmer + ?Sized>(confirmer: &C, message: &str) -> Option<Confirmed> {
    let answer = Confirmed::from_answer(confirmer.confirm(message));
    if answer.is_none() {
        tracing::debug!("confirmation declined: {}", message);
    }
    answer
}
