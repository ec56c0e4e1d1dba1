//! A matched pair of sessions sharing one board.

use uuid::Uuid;

use crate::game::{Board, Outcome};
use crate::protocol::GameView;

/// Seat index on the wire: cross is 0, nought is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Cross,
    Nought,
}

impl Seat {
    fn code(self) -> u8 {
        match self {
            Seat::Cross => 0,
            Seat::Nought => 1,
        }
    }
}

/// One named game session holding up to two occupants.
///
/// The cross seat is assigned at creation and never reassigned; the
/// nought seat is filled exactly once, at join time.
#[derive(Debug)]
pub struct Room {
    name: String,
    cross: Uuid,
    nought: Option<Uuid>,
    board: Board,
}

impl Room {
    pub fn new(name: impl Into<String>, cross: Uuid) -> Self {
        Self {
            name: name.into(),
            cross,
            nought: None,
            board: Board::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True until the second seat is taken.
    pub fn is_waiting(&self) -> bool {
        self.nought.is_none()
    }

    /// Must only be called once, on a waiting room; the registry
    /// guards this.
    pub(crate) fn seat_nought(&mut self, occupant: Uuid) {
        debug_assert!(self.nought.is_none());
        self.nought = Some(occupant);
    }

    /// Occupants in deterministic order: cross first, then nought.
    pub fn occupants(&self) -> impl Iterator<Item = Uuid> {
        std::iter::once(self.cross).chain(self.nought)
    }

    /// Any occupant other than the creator holds the nought seat.
    pub fn seat_of(&self, occupant: Uuid) -> Seat {
        if occupant == self.cross {
            Seat::Cross
        } else {
            Seat::Nought
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Board view augmented for one recipient: whose turn it is from
    /// their seat, and the outcome text once the game is over.
    pub fn view_for(&self, occupant: Uuid) -> GameView {
        let seat = self.seat_of(occupant);
        let mut view = self.board.view();
        view.is_my_turn = Some(view.current_turn == seat.code());
        view.result = self.board.result().map(|outcome| {
            match outcome {
                Outcome::CrossWins => win_or_lose(seat, Seat::Cross),
                Outcome::NoughtWins => win_or_lose(seat, Seat::Nought),
                Outcome::Draw => "Draw",
            }
            .to_string()
        });
        view
    }
}

fn win_or_lose(seat: Seat, winner: Seat) -> &'static str {
    if seat == winner {
        "You Win!"
    } else {
        "You Lose"
    }
}
