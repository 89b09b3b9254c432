//! The rules engine. A [Game] owns the board and the players, answers legality probes
//! and commits legal actions, one player at a time.
//!
//! ```
//! use quoridor_game_types::config::GameConfig;
//! use quoridor_game_types::rules::{Game, TurnState};
//! use quoridor_game_types::types::PlayerId;
//! use quoridor_game_types::wire_representation::Position;
//!
//! let mut game = Game::new(&GameConfig::default()).unwrap();
//! game.submit_move(PlayerId(0), Position::new(4, 7)).unwrap();
//! assert_eq!(game.turn_state(), TurnState::AwaitingAction(PlayerId(1)));
//! ```
use std::error::Error;
use std::fmt;

use tracing::{debug, trace};

use crate::board::{Board, EdgeUndo, Fence, FenceLedger};
use crate::config::{GameConfig, MAX_SIZE};
use crate::path_oracle;
use crate::types::{
    Direction, DistanceQueryableGame, MoveKind, PlayerIDGettableGame, PlayerId, Role,
    SizeDeterminableGame, VictorDeterminableGame,
};
use crate::wire_representation::{PlayerState, Position, Snapshot};

mod events;
mod moves;
mod violation;

pub use events::{EventLog, GameEvent, GameObserver, NoopObserver};
pub use violation::{EngineError, RuleViolation};

/// A player seated at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    position: Position,
    goal: Direction,
    fences_left: u8,
    role: Role,
    distance: Option<u32>,
}

impl Player {
    #[allow(missing_docs)]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[allow(missing_docs)]
    pub fn position(&self) -> Position {
        self.position
    }

    /// the side of the board this player is racing to
    pub fn goal(&self) -> Direction {
        self.goal
    }

    #[allow(missing_docs)]
    pub fn fences_left(&self) -> u8 {
        self.fences_left
    }

    #[allow(missing_docs)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// steps to the goal line as of the last commit
    pub fn distance(&self) -> Option<u32> {
        self.distance
    }

    fn to_wire(self) -> PlayerState {
        PlayerState {
            position: self.position,
            goal: self.goal,
            fences_left: self.fences_left,
            role: self.role,
        }
    }
}

/// Whose turn it is, or who won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// waiting for this player to move or place a fence
    AwaitingAction(PlayerId),
    /// this player reached their goal line
    Finished(PlayerId),
}

/// A game in progress.
///
/// Probes (`validate_*`, `legal_moves`, `probe_fence`) never change what a caller can
/// observe. `validate_move` and `legal_moves` only read. `validate_fence` and
/// `probe_fence` take `&mut self`: they sever the fence's edges in place, measure every
/// player, then restore the saved edge bytes exactly, whatever the outcome. Nothing else
/// is touched, so the game compares equal before and after.
///
/// Commands (`submit_*`) either commit an action and pass the turn on, or leave
/// everything as it was and return why.
///
/// Methods taking a bare [PlayerId] outside of the commands panic when the id isn't one
/// of [Game::players].
#[derive(Debug, Clone)]
pub struct Game<O: GameObserver = NoopObserver> {
    board: Board,
    players: Vec<Player>,
    turn: TurnState,
    last_violation: Option<RuleViolation>,
    observer: O,
}

impl Game {
    /// a new game with pawns on their bases and nothing else observing it
    pub fn new(config: &GameConfig) -> Result<Self, Box<dyn Error>> {
        Game::with_observer(config, NoopObserver)
    }

    /// rebuild a game from its wire form
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, Box<dyn Error>> {
        Game::from_snapshot_with_observer(snapshot, NoopObserver)
    }
}

impl<O: GameObserver> Game<O> {
    /// a new game reporting to observer
    pub fn with_observer(config: &GameConfig, observer: O) -> Result<Self, Box<dyn Error>> {
        config.validate()?;
        let mut board = Board::new(config.board_size());
        let allowance = config.fence_allowance();
        let bases = board.grid().bases(config.player_count());

        let mut players = Vec::with_capacity(bases.len());
        for (i, (base, role)) in bases.into_iter().zip(config.roles.iter()).enumerate() {
            let id = PlayerId(i as u8);
            board.place_pawn(id, base);
            players.push(Player {
                id,
                position: base,
                goal: board.grid().goal_for_base(base),
                fences_left: allowance,
                role: *role,
                distance: None,
            });
        }

        let mut game = Game {
            board,
            players,
            turn: TurnState::AwaitingAction(PlayerId(0)),
            last_violation: None,
            observer,
        };
        game.refresh_all_distances();
        debug!(
            size = game.size(),
            players = game.players.len(),
            allowance,
            "new game"
        );
        Ok(game)
    }

    /// rebuild a game from its wire form, reporting to observer
    pub fn from_snapshot_with_observer(
        snapshot: &Snapshot,
        observer: O,
    ) -> Result<Self, Box<dyn Error>> {
        if !(2..=MAX_SIZE).contains(&snapshot.size) {
            return Err(format!("board size {} is out of range", snapshot.size).into());
        }
        if snapshot.size % 2 != 0 {
            return Err(format!("board size {} is odd, bases need a middle cell", snapshot.size).into());
        }
        let count = snapshot.player_count();
        if count != 2 && count != 4 {
            return Err(format!("quoridor is played by 2 or 4 players, not {}", count).into());
        }

        let mut board = Board::new(snapshot.size);
        let mut players = Vec::with_capacity(count);
        for (i, state) in snapshot.players.iter().enumerate() {
            let id = PlayerId(i as u8);
            if board.grid().off_board(state.position) {
                return Err(format!("{} is off the board at {}", id, state.position).into());
            }
            if let Some(other) = board.occupancy().at(state.position) {
                return Err(format!("{} and {} share {}", other, id, state.position).into());
            }
            if board.grid().is_on_goal(state.position, state.goal) && snapshot.winner != Some(id) {
                return Err(format!("{} is on its goal line but didn't win", id).into());
            }
            board.place_pawn(id, state.position);
            players.push(Player {
                id,
                position: state.position,
                goal: state.goal,
                fences_left: state.fences_left,
                role: state.role,
                distance: None,
            });
        }

        for fence in &snapshot.fences {
            if !board.fence_fits(fence) {
                return Err(format!("fence {} doesn't fit on the board", fence).into());
            }
            board.sever(fence);
            board.commit_fence(*fence);
        }

        let known = |id: PlayerId| id.as_usize() < count;
        if !known(snapshot.current) {
            return Err(format!("current {} is not in the game", snapshot.current).into());
        }
        let turn = match snapshot.winner {
            Some(winner) if !known(winner) => {
                return Err(format!("winner {} is not in the game", winner).into());
            }
            Some(winner) => TurnState::Finished(winner),
            None => TurnState::AwaitingAction(snapshot.current),
        };

        let mut game = Game {
            board,
            players,
            turn,
            last_violation: None,
            observer,
        };
        if let TurnState::Finished(winner) = game.turn {
            if !game.has_won(winner) {
                return Err(format!("winner {} is not on its goal line", winner).into());
            }
        }
        game.refresh_all_distances();
        if let Some(wayless) = game.players.iter().find(|p| p.distance.is_none()) {
            return Err(format!("{} has no way to its goal", wayless.id).into());
        }
        Ok(game)
    }

    /// the wire form of this game
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size(),
            players: self.players.iter().map(|p| p.to_wire()).collect(),
            fences: self.board.fences().iter().copied().collect(),
            current: self.current_player(),
            winner: self.get_winner(),
        }
    }

    #[allow(missing_docs)]
    pub fn size(&self) -> u8 {
        self.board.grid().size()
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// can a pawn cross from pos towards dir, ignoring other pawns
    pub fn is_open(&self, pos: Position, dir: Direction) -> bool {
        self.board.is_open(pos, dir)
    }

    /// every placed fence, oldest first
    pub fn fences(&self) -> &FenceLedger {
        self.board.fences()
    }

    /// players in turn order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[allow(missing_docs)]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.as_usize())
    }

    /// the player to act, or the winner once the game is over
    pub fn current_player(&self) -> PlayerId {
        match self.turn {
            TurnState::AwaitingAction(id) | TurnState::Finished(id) => id,
        }
    }

    #[allow(missing_docs)]
    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// why the most recent command was refused, cleared by the next successful one
    pub fn last_violation(&self) -> Option<RuleViolation> {
        self.last_violation
    }

    #[allow(missing_docs)]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn seat(&self, id: PlayerId) -> &Player {
        &self.players[id.as_usize()]
    }

    /// is the player standing on their goal line
    pub fn has_won(&self, id: PlayerId) -> bool {
        let player = self.seat(id);
        self.board.grid().is_on_goal(player.position, player.goal)
    }

    /// could the player move their pawn to target, whoever's turn it is
    pub fn validate_move(&self, id: PlayerId, target: Position) -> Result<MoveKind, RuleViolation> {
        moves::classify(&self.board, self.seat(id).position, target)
    }

    /// every cell the player could move their pawn to
    pub fn legal_moves(&self, id: PlayerId) -> Vec<(Position, MoveKind)> {
        moves::legal_targets(&self.board, self.seat(id).position)
    }

    /// could the player place fence, whoever's turn it is. Takes `&mut self` to try the
    /// fence out, the board is exactly as before when this returns.
    pub fn validate_fence(&mut self, id: PlayerId, fence: &Fence) -> Result<(), RuleViolation> {
        if self.seat(id).fences_left == 0 {
            return Err(RuleViolation::R1);
        }
        self.probe_fence(fence).map(|_| ())
    }

    /// Every player's distance with fence in place, in turn order, without placing it.
    /// Ignores how many fences anybody has left.
    pub fn probe_fence(&mut self, fence: &Fence) -> Result<Vec<u32>, RuleViolation> {
        let (undo, distances) = self.sever_checked(fence)?;
        self.board.restore(undo);
        Ok(distances)
    }

    // leaves the fence's edges severed on success only
    fn sever_checked(&mut self, fence: &Fence) -> Result<(EdgeUndo, Vec<u32>), RuleViolation> {
        if !self.board.fence_fits(fence) {
            return Err(RuleViolation::R4);
        }
        let undo = self.board.sever(fence);
        let distances: Option<Vec<u32>> = self
            .players
            .iter()
            .map(|p| {
                path_oracle::distance_to_goal(
                    self.board.grid(),
                    self.board.edges(),
                    p.goal,
                    p.position,
                )
            })
            .collect();
        match distances {
            Some(distances) => Ok((undo, distances)),
            None => {
                self.board.restore(undo);
                Err(RuleViolation::R5)
            }
        }
    }

    /// Move the current player's pawn to target
    pub fn submit_move(&mut self, id: PlayerId, target: Position) -> Result<MoveKind, EngineError> {
        let idx = self.check_caller(id)?;
        let kind = match self.validate_move(id, target) {
            Ok(kind) => kind,
            Err(violation) => return Err(self.reject(id, violation)),
        };

        let from = self.players[idx].position;
        self.board.move_pawn(id, from, target);
        self.players[idx].position = target;
        self.refresh_all_distances();
        self.last_violation = None;

        debug!(player = id.0, %from, to = %target, ?kind, "move committed");
        self.observer.observe(&GameEvent::MoveCommitted {
            player: id,
            from,
            to: target,
            kind,
        });
        self.end_turn(id);
        Ok(kind)
    }

    /// Place a fence for the current player
    pub fn submit_fence(&mut self, id: PlayerId, fence: Fence) -> Result<(), EngineError> {
        let idx = self.check_caller(id)?;
        if self.players[idx].fences_left == 0 {
            return Err(self.reject(id, RuleViolation::R1));
        }
        let distances = match self.sever_checked(&fence) {
            Ok((_, distances)) => distances,
            Err(violation) => return Err(self.reject(id, violation)),
        };

        self.board.commit_fence(fence);
        self.players[idx].fences_left -= 1;
        for (player, distance) in self.players.iter_mut().zip(distances) {
            player.distance = Some(distance);
        }
        self.last_violation = None;

        debug!(
            player = id.0,
            %fence,
            fences_left = self.players[idx].fences_left,
            "fence committed"
        );
        self.observer
            .observe(&GameEvent::FenceCommitted { player: id, fence });
        self.end_turn(id);
        Ok(())
    }

    fn check_caller(&self, id: PlayerId) -> Result<usize, EngineError> {
        if id.as_usize() >= self.players.len() {
            return Err(EngineError::UnknownPlayer(id));
        }
        match self.turn {
            TurnState::Finished(winner) => Err(EngineError::GameOver { winner }),
            TurnState::AwaitingAction(expected) if expected != id => {
                Err(EngineError::NotYourTurn { expected, got: id })
            }
            TurnState::AwaitingAction(_) => Ok(id.as_usize()),
        }
    }

    fn reject(&mut self, id: PlayerId, violation: RuleViolation) -> EngineError {
        trace!(player = id.0, %violation, "action rejected");
        self.last_violation = Some(violation);
        EngineError::Rule(violation)
    }

    fn end_turn(&mut self, actor: PlayerId) {
        if self.has_won(actor) {
            self.turn = TurnState::Finished(actor);
            debug!(winner = actor.0, "game finished");
            self.observer
                .observe(&GameEvent::GameFinished { winner: actor });
            return;
        }
        let next = PlayerId(((actor.as_usize() + 1) % self.players.len()) as u8);
        self.turn = TurnState::AwaitingAction(next);
        self.observer
            .observe(&GameEvent::TurnAdvanced { current: next });
    }

    fn refresh_all_distances(&mut self) {
        for player in self.players.iter_mut() {
            player.distance = path_oracle::distance_to_goal(
                self.board.grid(),
                self.board.edges(),
                player.goal,
                player.position,
            );
        }
    }
}

impl<O: GameObserver> PlayerIDGettableGame for Game<O> {
    fn get_player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }
}

impl<O: GameObserver> VictorDeterminableGame for Game<O> {
    fn is_over(&self) -> bool {
        matches!(self.turn, TurnState::Finished(_))
    }

    fn get_winner(&self) -> Option<PlayerId> {
        match self.turn {
            TurnState::Finished(winner) => Some(winner),
            TurnState::AwaitingAction(_) => None,
        }
    }
}

impl<O: GameObserver> SizeDeterminableGame for Game<O> {
    fn get_size(&self) -> u8 {
        self.size()
    }
}

impl<O: GameObserver> DistanceQueryableGame for Game<O> {
    fn distance_to_goal(&self, player_id: &PlayerId) -> Option<u32> {
        self.player(*player_id).and_then(|p| p.distance)
    }
}

/// One line per row of cells with pawns by index, fences drawn as `|` between cells and
/// `-` under them.
impl<O: GameObserver> fmt::Display for Game<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size() as i32;
        for b in 0..=size {
            for a in 0..=size {
                let pos = Position::new(a, b);
                match self.board.occupancy().at(pos) {
                    Some(id) => write!(f, "{}", id.0)?,
                    None => write!(f, ".")?,
                }
                if a < size {
                    let wall = if self.is_open(pos, Direction::Right) { ' ' } else { '|' };
                    write!(f, "{}", wall)?;
                }
            }
            writeln!(f)?;
            if b < size {
                for a in 0..=size {
                    let wall = if self.is_open(Position::new(a, b), Direction::Down) {
                        ' '
                    } else {
                        '-'
                    };
                    write!(f, "{}", wall)?;
                    if a < size {
                        write!(f, " ")?;
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EdgeState;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn snapshot_fixture(body: &str) -> Snapshot {
        serde_json::from_str(body).expect("the json literal is valid")
    }

    fn logged_fixture(body: &str) -> Game<EventLog> {
        Game::from_snapshot_with_observer(&snapshot_fixture(body), EventLog::new())
            .expect("the fixture is consistent")
    }

    fn two_pawns(first: Position, second: Position) -> Game {
        pawns_at(first, second, None)
    }

    fn pawns_at(first: Position, second: Position, winner: Option<PlayerId>) -> Game {
        let mut s = snapshot_fixture(include_str!("../../fixtures/start_of_game.json"));
        s.players[0].position = first;
        s.players[1].position = second;
        s.winner = winner;
        Game::from_snapshot(&s).expect("the pawns are on the board")
    }

    #[test]
    fn test_start_of_game() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        let p0 = game.players()[0];
        let p1 = game.players()[1];
        assert_eq!(p0.position(), Position::new(4, 8));
        assert_eq!(p0.goal(), Direction::Up);
        assert_eq!(p1.position(), Position::new(4, 0));
        assert_eq!(p1.goal(), Direction::Down);
        assert_eq!(p0.fences_left(), 10);
        assert_eq!(p1.role(), Role::Ai);
        assert_eq!(game.distance_to_goal(&PlayerId(0)), Some(8));
        assert_eq!(game.distance_to_goal(&PlayerId(1)), Some(8));
        assert_eq!(game.turn_state(), TurnState::AwaitingAction(PlayerId(0)));

        assert_eq!(
            game.submit_move(PlayerId(0), Position::new(4, 7)),
            Ok(MoveKind::Step)
        );
        assert_eq!(game.distance_to_goal(&PlayerId(0)), Some(7));
        assert_eq!(game.distance_to_goal(&PlayerId(1)), Some(8));
        assert_eq!(game.current_player(), PlayerId(1));
    }

    #[test]
    fn test_new_game_matches_fixture() {
        let game = Game::new(&GameConfig::default()).unwrap();
        assert_eq!(
            game.snapshot(),
            snapshot_fixture(include_str!("../../fixtures/start_of_game.json"))
        );
    }

    #[test]
    fn test_four_player_setup() {
        let game = Game::new(&GameConfig::new(8, vec![Role::Ai; 4])).unwrap();
        let seats: Vec<_> = game
            .players()
            .iter()
            .map(|p| (p.position(), p.goal(), p.fences_left()))
            .collect();
        assert_eq!(
            seats,
            vec![
                (Position::new(4, 8), Direction::Up, 5),
                (Position::new(0, 4), Direction::Right, 5),
                (Position::new(4, 0), Direction::Down, 5),
                (Position::new(8, 4), Direction::Left, 5),
            ]
        );
        assert!(game.players().iter().all(|p| p.distance() == Some(8)));
        assert_eq!(game.get_player_ids().len(), 4);
    }

    #[test]
    fn test_bad_configs() {
        assert!(Game::new(&GameConfig::new(8, vec![Role::Ai; 3])).is_err());
        assert!(Game::new(&GameConfig::new(0, vec![Role::Ai; 2])).is_err());
    }

    #[test]
    fn test_fence_sealing_a_player_is_rejected() {
        let mut game = logged_fixture(include_str!("../../fixtures/cornered.json"));
        assert_eq!(game.distance_to_goal(&PlayerId(1)), Some(7));
        let before: EdgeState = game.board().edges().clone();

        let seal = Fence::horizontal(3, 3);
        assert_eq!(
            game.validate_fence(PlayerId(0), &seal),
            Err(RuleViolation::R5)
        );
        assert_eq!(game.board().edges(), &before);
        assert_eq!(game.probe_fence(&seal), Err(RuleViolation::R5));
        assert_eq!(game.board().edges().as_bytes(), before.as_bytes());

        assert_eq!(
            game.submit_fence(PlayerId(0), seal),
            Err(EngineError::Rule(RuleViolation::R5))
        );
        assert_eq!(game.last_violation(), Some(RuleViolation::R5));
        assert_eq!(game.board().edges(), &before);
        assert_eq!(game.fences().len(), 4);
        assert_eq!(game.players()[0].fences_left(), 8);
        assert_eq!(game.current_player(), PlayerId(0));
        assert!(game.observer().events().is_empty());

        // one of the two exits closed is fine
        assert_eq!(game.submit_fence(PlayerId(0), Fence::horizontal(4, 3)), Ok(()));
        assert_eq!(game.last_violation(), None);
        assert_eq!(game.distance_to_goal(&PlayerId(1)), Some(7));
    }

    #[test]
    fn test_trial_fence_reports_distances_and_restores() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        let before = game.board().edges().clone();
        let snapshot = game.snapshot();
        // straight in front of player 0
        let distances = game.probe_fence(&Fence::horizontal(4, 7)).unwrap();
        assert_eq!(distances, vec![9, 9]);
        assert_eq!(game.board().edges(), &before);
        assert!(game.fences().is_empty());
        assert_eq!(game.distance_to_goal(&PlayerId(0)), Some(8));

        // accepted or refused, the same bytes come back
        assert_eq!(game.validate_fence(PlayerId(0), &Fence::vertical(2, 5)), Ok(()));
        assert_eq!(game.probe_fence(&Fence::horizontal(8, 8)), Err(RuleViolation::R4));
        assert_eq!(game.board().edges().as_bytes(), before.as_bytes());
        assert_eq!(game.snapshot(), snapshot);
        assert_eq!(game.last_violation(), None);
        assert_eq!(game.players()[0].distance(), Some(8));
    }

    #[test]
    fn test_fence_rules_r1_r4() {
        let mut s = snapshot_fixture(include_str!("../../fixtures/start_of_game.json"));
        s.players[1].fences_left = 0;
        let mut game = Game::from_snapshot(&s).unwrap();

        assert_eq!(game.submit_fence(PlayerId(0), Fence::horizontal(3, 3)), Ok(()));
        assert_eq!(
            game.validate_fence(PlayerId(1), &Fence::horizontal(0, 0)),
            Err(RuleViolation::R1)
        );
        assert_eq!(
            game.submit_fence(PlayerId(1), Fence::horizontal(0, 0)),
            Err(EngineError::Rule(RuleViolation::R1))
        );

        // player 0 still has fences, so only placement matters
        for clash in [
            Fence::horizontal(3, 3),
            Fence::vertical(3, 3),
            Fence::horizontal(2, 3),
            Fence::horizontal(4, 3),
            Fence::horizontal(8, 0),
            Fence::vertical(-1, 2),
        ] {
            assert_eq!(
                game.validate_fence(PlayerId(0), &clash),
                Err(RuleViolation::R4),
                "{}",
                clash
            );
        }
        assert_eq!(game.validate_fence(PlayerId(0), &Fence::horizontal(5, 3)), Ok(()));
        assert_eq!(game.validate_fence(PlayerId(0), &Fence::vertical(3, 4)), Ok(()));
    }

    #[test]
    fn test_jump_over_facing_pawn() {
        let mut game = logged_fixture(include_str!("../../fixtures/adjacent_pawns.json"));
        assert_eq!(
            game.validate_move(PlayerId(0), Position::new(4, 2)),
            Ok(MoveKind::Jump)
        );
        // a fence past the landing cell changes nothing
        game.submit_fence(PlayerId(0), Fence::horizontal(3, 1)).unwrap();
        assert!(!game.is_open(Position::new(4, 2), Direction::Up));
        assert_eq!(
            game.validate_move(PlayerId(0), Position::new(4, 2)),
            Ok(MoveKind::Jump)
        );
        assert_eq!(
            game.validate_move(PlayerId(1), Position::new(4, 5)),
            Ok(MoveKind::Jump)
        );

        game.submit_move(PlayerId(1), Position::new(3, 3)).unwrap();
        game.submit_move(PlayerId(0), Position::new(4, 3)).unwrap();
        assert_eq!(game.players()[0].position(), Position::new(4, 3));
        assert_eq!(
            game.board().occupancy().at(Position::new(4, 4)),
            None
        );
    }

    #[test]
    fn test_fence_behind_pawn_allows_side_steps() {
        let mut game = game_with_fence_behind();
        assert_eq!(
            game.validate_move(PlayerId(0), Position::new(4, 2)),
            Err(RuleViolation::R2)
        );
        let mut moves = game.legal_moves(PlayerId(0));
        moves.sort_by_key(|(p, _)| *p);
        assert_eq!(
            moves,
            vec![
                (Position::new(3, 3), MoveKind::SideStep),
                (Position::new(3, 4), MoveKind::Step),
                (Position::new(4, 5), MoveKind::Step),
                (Position::new(5, 3), MoveKind::SideStep),
                (Position::new(5, 4), MoveKind::Step),
            ]
        );
        assert_eq!(
            game.submit_move(PlayerId(1), Position::new(4, 2)),
            Err(EngineError::Rule(RuleViolation::R3))
        );
        assert_eq!(
            game.submit_move(PlayerId(1), Position::new(4, 4)),
            Err(EngineError::Rule(RuleViolation::R6))
        );
        assert_eq!(
            game.submit_move(PlayerId(1), Position::new(4, 5)),
            Ok(MoveKind::Jump)
        );
    }

    fn game_with_fence_behind() -> Game {
        let mut game = game_fixture_from(include_str!("../../fixtures/adjacent_pawns.json"));
        game.submit_fence(PlayerId(0), Fence::horizontal(4, 2)).unwrap();
        game
    }

    fn game_fixture_from(body: &str) -> Game {
        Game::from_snapshot(&snapshot_fixture(body)).unwrap()
    }

    #[test]
    fn test_jump_symmetry() {
        let center = Position::new(4, 4);
        for dir in Direction::all() {
            let other = center.add_vec(dir.to_vector());
            let game = two_pawns(center, other);
            assert_eq!(
                game.validate_move(PlayerId(0), other.add_vec(dir.to_vector())),
                Ok(MoveKind::Jump)
            );
            assert_eq!(
                game.validate_move(PlayerId(1), center.add_vec(dir.opposite().to_vector())),
                Ok(MoveKind::Jump)
            );
        }
    }

    #[test]
    fn test_win_exactness() {
        for b in 0..=8 {
            let home = b == 0;
            let game = pawns_at(
                Position::new(2, b),
                Position::new(6, 4),
                home.then(|| PlayerId(0)),
            );
            assert_eq!(game.has_won(PlayerId(0)), home, "row {}", b);
            assert_eq!(game.is_over(), home, "row {}", b);
            assert!(!game.has_won(PlayerId(1)));
        }
        for b in 0..=8 {
            let home = b == 8;
            let game = pawns_at(
                Position::new(2, 4),
                Position::new(6, b),
                home.then(|| PlayerId(1)),
            );
            assert_eq!(game.has_won(PlayerId(1)), home, "row {}", b);
            assert!(!game.has_won(PlayerId(0)));
        }
        for a in 0..=8 {
            let game = pawns_at(Position::new(a, 0), Position::new(a, 7), Some(PlayerId(0)));
            assert!(game.has_won(PlayerId(0)));
            assert!(!game.has_won(PlayerId(1)));
        }
    }

    #[test]
    fn test_reaching_goal_finishes_game() {
        let mut s = snapshot_fixture(include_str!("../../fixtures/start_of_game.json"));
        s.players[0].position = Position::new(2, 1);
        let mut game =
            Game::from_snapshot_with_observer(&s, EventLog::new()).expect("consistent");

        game.submit_move(PlayerId(0), Position::new(2, 0)).unwrap();
        assert_eq!(game.turn_state(), TurnState::Finished(PlayerId(0)));
        assert!(game.is_over());
        assert_eq!(game.get_winner(), Some(PlayerId(0)));
        assert_eq!(
            game.observer().events().last(),
            Some(&GameEvent::GameFinished {
                winner: PlayerId(0)
            })
        );
        assert_eq!(
            game.submit_move(PlayerId(1), Position::new(4, 1)),
            Err(EngineError::GameOver {
                winner: PlayerId(0)
            })
        );
        assert_eq!(game.snapshot().winner, Some(PlayerId(0)));
    }

    #[test]
    fn test_caller_checks() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        assert_eq!(
            game.submit_move(PlayerId(1), Position::new(4, 1)),
            Err(EngineError::NotYourTurn {
                expected: PlayerId(0),
                got: PlayerId(1)
            })
        );
        assert_eq!(
            game.submit_fence(PlayerId(5), Fence::horizontal(0, 0)),
            Err(EngineError::UnknownPlayer(PlayerId(5)))
        );
        assert_eq!(game.last_violation(), None);

        assert_eq!(
            game.submit_move(PlayerId(0), Position::new(4, 6)),
            Err(EngineError::Rule(RuleViolation::R2))
        );
        assert_eq!(game.last_violation(), Some(RuleViolation::R2));
        assert_eq!(game.current_player(), PlayerId(0));
        game.submit_move(PlayerId(0), Position::new(3, 8)).unwrap();
        assert_eq!(game.last_violation(), None);
    }

    #[test]
    fn test_events_in_order() {
        let mut game = Game::with_observer(&GameConfig::default(), EventLog::new()).unwrap();
        game.submit_move(PlayerId(0), Position::new(4, 7)).unwrap();
        game.submit_fence(PlayerId(1), Fence::horizontal(0, 0))
            .unwrap();
        assert_eq!(
            game.observer().events(),
            &[
                GameEvent::MoveCommitted {
                    player: PlayerId(0),
                    from: Position::new(4, 8),
                    to: Position::new(4, 7),
                    kind: MoveKind::Step,
                },
                GameEvent::TurnAdvanced {
                    current: PlayerId(1)
                },
                GameEvent::FenceCommitted {
                    player: PlayerId(1),
                    fence: Fence::horizontal(0, 0),
                },
                GameEvent::TurnAdvanced {
                    current: PlayerId(0)
                },
            ]
        );
        assert_eq!(game.players()[1].fences_left(), 9);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        for body in [
            include_str!("../../fixtures/start_of_game.json"),
            include_str!("../../fixtures/cornered.json"),
            include_str!("../../fixtures/adjacent_pawns.json"),
            include_str!("../../fixtures/four_players.json"),
        ] {
            let s = snapshot_fixture(body);
            let game = Game::from_snapshot(&s).unwrap();
            assert_eq!(game.snapshot(), s);
        }
        let game = game_fixture_from(include_str!("../../fixtures/four_players.json"));
        assert_eq!(game.turn_state(), TurnState::AwaitingAction(PlayerId(2)));
        assert_eq!(game.fences().len(), 2);
    }

    #[test]
    fn test_inconsistent_snapshots() {
        let start = snapshot_fixture(include_str!("../../fixtures/start_of_game.json"));

        let mut shared = start.clone();
        shared.players[1].position = Position::new(4, 8);
        assert!(Game::from_snapshot(&shared).is_err());

        let mut off = start.clone();
        off.players[0].position = Position::new(9, 3);
        assert!(Game::from_snapshot(&off).is_err());

        let mut crossing = start.clone();
        crossing.fences = vec![Fence::horizontal(2, 2), Fence::vertical(2, 2)];
        assert!(Game::from_snapshot(&crossing).is_err());

        let mut current = start.clone();
        current.current = PlayerId(2);
        assert!(Game::from_snapshot(&current).is_err());

        let mut three = start.clone();
        three.players.push(start.players[0]);
        assert!(Game::from_snapshot(&three).is_err());

        let mut odd = start.clone();
        odd.size = 7;
        odd.players[0].position = Position::new(4, 7);
        assert!(Game::from_snapshot(&odd).is_err());

        let mut big = start.clone();
        big.size = 42;
        assert!(Game::from_snapshot(&big).is_err());

        let mut sealed = snapshot_fixture(include_str!("../../fixtures/cornered.json"));
        sealed.fences.push(Fence::horizontal(3, 3));
        let err = Game::from_snapshot(&sealed).unwrap_err();
        assert_eq!(err.to_string(), "player 1 has no way to its goal");
    }

    #[test]
    fn test_goal_line_and_winner_must_agree() {
        let start = snapshot_fixture(include_str!("../../fixtures/start_of_game.json"));

        // player 1 heading down already stands on row 8 but nobody won
        let mut home = start.clone();
        home.players[1].position = Position::new(3, 8);
        let err = Game::from_snapshot(&home).unwrap_err();
        assert_eq!(err.to_string(), "player 1 is on its goal line but didn't win");

        // the same position is fine once it's recorded as won
        home.winner = Some(PlayerId(1));
        home.current = PlayerId(1);
        let game = Game::from_snapshot(&home).unwrap();
        assert_eq!(game.turn_state(), TurnState::Finished(PlayerId(1)));
        assert_eq!(game.snapshot(), home);

        // a winner away from its goal line
        let mut early = start.clone();
        early.winner = Some(PlayerId(0));
        let err = Game::from_snapshot(&early).unwrap_err();
        assert_eq!(err.to_string(), "winner player 0 is not on its goal line");

        // both on their goal lines, only one can have won
        let mut both = home.clone();
        both.players[0].position = Position::new(5, 0);
        assert!(Game::from_snapshot(&both).is_err());
    }

    #[test]
    fn test_placed_fences_keep_every_path_open() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let orientations = crate::board::Orientation::all();

        for _ in 0..5000 {
            let id = game.current_player();
            if game.players()[id.as_usize()].fences_left() == 0 {
                break;
            }
            let fence = Fence::new(
                rng.gen_range(-1..9),
                rng.gen_range(-1..9),
                orientations[rng.gen_range(0..2)],
            );
            let before = game.board().edges().clone();
            match game.submit_fence(id, fence) {
                Ok(()) => assert!(game.fences().contains(&fence)),
                Err(_) => assert_eq!(game.board().edges(), &before),
            }
            for p in game.players() {
                assert!(p.distance().is_some(), "{:?}\n{}", p, game);
            }
        }

        assert_eq!(game.fences().len(), 20);
        let placed: Vec<_> = game.fences().iter().collect();
        for (i, f) in placed.iter().enumerate() {
            for g in &placed[i + 1..] {
                assert!(!f.conflicts_with(g), "{} and {}", f, g);
            }
        }
    }

    #[test]
    fn test_display() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        game.submit_fence(PlayerId(0), Fence::horizontal(0, 0)).unwrap();
        game.submit_fence(PlayerId(1), Fence::vertical(0, 2)).unwrap();
        let board = game.to_string();
        let lines: Vec<_> = board.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], ". . . . 1 . . . .");
        assert!(lines[1].starts_with("- - "));
        assert!(lines[4].starts_with(".|. "));
        assert!(lines[6].starts_with(".|. "));
        assert_eq!(lines[16], ". . . . 0 . . . .");
    }
}
