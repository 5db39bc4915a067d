use crate::answer::AnswerKey;
use crate::hints::HintReel;

/// Seconds on the clock when a session starts.
pub const INITIAL_SECONDS: u32 = 120;
/// Seconds taken off the clock for each wrong guess.
pub const PENALTY_SECONDS: u32 = 10;
/// Wrong guesses allowed before the session is lost.
pub const MAX_ATTEMPTS: usize = 4;

/// How long a regular miss message stays on screen, in ticks.
const MISS_STATUS_TICKS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum LossReason {
    #[strum(serialize = "time expired")]
    TimeExpired,
    #[strum(serialize = "attempts exhausted")]
    AttemptsExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Playing,
    Won,
    Lost(LossReason),
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub initial_secs: u32,
    pub penalty_secs: u32,
    pub max_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_secs: INITIAL_SECONDS,
            penalty_secs: PENALTY_SECONDS,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

/// One submitted guess. An empty or whitespace-only input still consumes an
/// attempt but is recorded as skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub raw: String,
    pub skipped: bool,
}

/// Transient message shown after an attempt. At most one is pending;
/// submitting a new attempt replaces any prior one. `ticks_left == None`
/// means the message stays until the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub urgent: bool,
    pub ticks_left: Option<u32>,
}

/// Result record for a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub won: bool,
    pub loss_reason: Option<LossReason>,
    pub attempts_used: usize,
    pub elapsed_secs: u32,
    /// Both accepted titles, exposed only when the session was lost.
    pub revealed_answer: Option<(String, String)>,
}

/// One play-through from start to Won/Lost. The session is a plain value
/// driven by `on_tick` and `submit_guess`; it owns no timers and renders
/// nothing.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SessionConfig,
    answer: AnswerKey,
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub attempts_used: usize,
    pub history: Vec<Guess>,
    pub hints: HintReel,
    pub status: Option<StatusLine>,
}

impl Session {
    pub fn new(answer: AnswerKey, config: SessionConfig) -> Self {
        let hints = HintReel::new(config.max_attempts);
        Self {
            seconds_remaining: config.initial_secs,
            config,
            answer,
            phase: Phase::Waiting,
            attempts_used: 0,
            history: Vec::new(),
            hints,
            status: None,
        }
    }

    /// Caps the hint reel at the number of stills actually available.
    pub fn with_hints(mut self, total: usize) -> Self {
        self.hints = HintReel::new(total.min(self.config.max_attempts));
        self
    }

    /// Begins the countdown and reveals the first still. No-op unless the
    /// session is still waiting.
    pub fn start(&mut self) {
        if self.phase != Phase::Waiting {
            return;
        }
        self.seconds_remaining = self.config.initial_secs;
        self.attempts_used = 0;
        self.phase = Phase::Playing;
        self.hints.reveal_next();
    }

    /// One second of clock time. No-op unless playing.
    pub fn on_tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);

        if let Some(status) = self.status.as_mut() {
            if let Some(ticks) = status.ticks_left.as_mut() {
                *ticks = ticks.saturating_sub(1);
                if *ticks == 0 {
                    self.status = None;
                }
            }
        }

        if self.seconds_remaining == 0 {
            self.finish(Phase::Lost(LossReason::TimeExpired));
        }
    }

    /// Checks a guess against both accepted titles. Returns true on a win.
    ///
    /// A miss consumes an attempt, takes the penalty off the clock (floored
    /// at zero), reveals the next still if any remain, and only then checks
    /// for attempt exhaustion. The win check always runs first, so a correct
    /// final-attempt guess wins.
    pub fn submit_guess(&mut self, raw: &str) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        if self.answer.matches(raw) {
            self.finish(Phase::Won);
            return true;
        }

        self.miss(raw);
        false
    }

    fn miss(&mut self, raw: &str) {
        let skipped = raw.trim().is_empty();
        self.history.push(Guess {
            raw: raw.to_string(),
            skipped,
        });
        self.attempts_used += 1;

        let last_attempt_ahead = self.attempts_used + 1 == self.config.max_attempts;
        self.status = Some(if last_attempt_ahead {
            StatusLine {
                text: "Last attempt!".into(),
                urgent: true,
                ticks_left: None,
            }
        } else {
            StatusLine {
                text: if skipped { "Skipped." } else { "Not it." }.into(),
                urgent: false,
                ticks_left: Some(MISS_STATUS_TICKS),
            }
        });

        self.hints.reveal_next();

        // The penalty lands before any exhaustion loss is declared.
        self.seconds_remaining = self.seconds_remaining.saturating_sub(self.config.penalty_secs);

        if self.attempts_used >= self.config.max_attempts {
            self.finish(Phase::Lost(LossReason::AttemptsExhausted));
        }
    }

    fn finish(&mut self, phase: Phase) {
        debug_assert!(matches!(phase, Phase::Won | Phase::Lost(_)));
        self.phase = phase;
        self.status = None;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost(_))
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.config.initial_secs - self.seconds_remaining
    }

    pub fn answer(&self) -> &AnswerKey {
        &self.answer
    }

    /// The result record, available once the session is over.
    pub fn summary(&self) -> Option<SessionSummary> {
        let loss_reason = match self.phase {
            Phase::Won => None,
            Phase::Lost(reason) => Some(reason),
            Phase::Waiting | Phase::Playing => return None,
        };
        let won = loss_reason.is_none();

        Some(SessionSummary {
            won,
            loss_reason,
            attempts_used: self.attempts_used,
            elapsed_secs: self.elapsed_secs(),
            revealed_answer: (!won).then(|| {
                (
                    self.answer.primary().to_string(),
                    self.answer.alternate().to_string(),
                )
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn started_session() -> Session {
        let mut session = Session::new(
            AnswerKey::new("Fight Club", "El club de la lucha"),
            SessionConfig::default(),
        );
        session.start();
        session
    }

    #[test]
    fn test_new_session_is_waiting() {
        let session = Session::new(AnswerKey::new("a", "b"), SessionConfig::default());
        assert_eq!(session.phase, Phase::Waiting);
        assert_eq!(session.seconds_remaining, INITIAL_SECONDS);
        assert_eq!(session.attempts_used, 0);
        assert_eq!(session.hints.revealed(), 0);
    }

    #[test]
    fn test_start_transitions_and_reveals_first_hint() {
        let session = started_session();
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.seconds_remaining, 120);
        assert_eq!(session.hints.revealed(), 1);
    }

    #[test]
    fn test_start_is_noop_unless_waiting() {
        let mut session = started_session();
        session.submit_guess("nope");
        session.start();
        assert_eq!(session.attempts_used, 1, "start must not reset a live game");
    }

    #[test]
    fn test_tick_decrements_clock() {
        let mut session = started_session();
        session.on_tick();
        session.on_tick();
        assert_eq!(session.seconds_remaining, 118);
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn test_tick_is_noop_before_start_and_after_finish() {
        let mut session = Session::new(AnswerKey::new("a", "b"), SessionConfig::default());
        session.on_tick();
        assert_eq!(session.seconds_remaining, INITIAL_SECONDS);

        session.start();
        session.submit_guess("a");
        let remaining = session.seconds_remaining;
        session.on_tick();
        assert_eq!(session.seconds_remaining, remaining);
    }

    #[test]
    fn test_time_expiry_loses_regardless_of_attempts() {
        let mut session = started_session();
        for _ in 0..120 {
            session.on_tick();
        }
        assert_eq!(session.phase, Phase::Lost(LossReason::TimeExpired));
        assert_eq!(session.attempts_used, 0);
        assert_eq!(session.elapsed_secs(), 120);
    }

    #[test]
    fn test_wrong_guess_costs_attempt_and_penalty() {
        // Scenario from the drawing board: start, guess "xyz", expect
        // one attempt used, 110 seconds left, still playing.
        let mut session = started_session();
        assert!(!session.submit_guess("xyz"));
        assert_eq!(session.attempts_used, 1);
        assert_eq!(session.seconds_remaining, 110);
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].raw, "xyz");
        assert!(!session.history[0].skipped);
    }

    #[test]
    fn test_correct_guess_wins_any_case_and_spacing() {
        for guess in ["Fight Club", "fightclub", "  FIGHT   club ", "ElClubDeLaLucha"] {
            let mut session = started_session();
            assert!(session.submit_guess(guess), "expected win for {guess:?}");
            assert_eq!(session.phase, Phase::Won);
        }
    }

    #[test]
    fn test_four_misses_lose_with_answer_exposed() {
        let mut session = started_session();
        for guess in ["a", "b", "c", "d"] {
            assert!(!session.submit_guess(guess));
        }
        assert_eq!(session.phase, Phase::Lost(LossReason::AttemptsExhausted));

        let summary = session.summary().unwrap();
        assert!(!summary.won);
        assert_eq!(summary.attempts_used, 4);
        assert_eq!(
            summary.revealed_answer,
            Some(("Fight Club".to_string(), "El club de la lucha".to_string()))
        );
    }

    #[test]
    fn test_win_on_final_attempt_beats_exhaustion() {
        let mut session = started_session();
        session.submit_guess("a");
        session.submit_guess("b");
        session.submit_guess("c");
        assert_eq!(session.attempts_used, 3);

        assert!(session.submit_guess("fight club"));
        assert_eq!(session.phase, Phase::Won);
    }

    #[test]
    fn penalty_applied_before_exhaustion_loss() {
        let mut session = started_session();
        for _ in 0..4 {
            session.submit_guess("wrong");
        }
        // 120 - 4 * 10: the fourth penalty landed even though that guess
        // also ended the game.
        assert_eq!(session.seconds_remaining, 80);
        assert_matches!(session.phase, Phase::Lost(LossReason::AttemptsExhausted));
        assert_eq!(session.summary().unwrap().elapsed_secs, 40);
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut session = Session::new(
            AnswerKey::new("a", "b"),
            SessionConfig {
                initial_secs: 15,
                ..SessionConfig::default()
            },
        );
        session.start();
        session.submit_guess("x");
        assert_eq!(session.seconds_remaining, 5);
        session.submit_guess("y");
        assert_eq!(session.seconds_remaining, 0);
        // Still playing: time loss only comes from the tick.
        assert_eq!(session.phase, Phase::Playing);
        session.on_tick();
        assert_eq!(session.phase, Phase::Lost(LossReason::TimeExpired));
    }

    #[test]
    fn test_empty_guess_is_skipped_but_counts() {
        let mut session = started_session();
        assert!(!session.submit_guess("   "));
        assert_eq!(session.attempts_used, 1);
        assert_eq!(session.seconds_remaining, 110);
        assert_eq!(session.hints.revealed(), 2);
        assert!(session.history[0].skipped);
        assert_eq!(session.history[0].raw, "   ");
    }

    #[test]
    fn test_submit_is_noop_when_not_playing() {
        let mut session = Session::new(
            AnswerKey::new("Fight Club", "El club de la lucha"),
            SessionConfig::default(),
        );
        assert!(!session.submit_guess("Fight Club"));
        assert_eq!(session.phase, Phase::Waiting);

        session.start();
        session.submit_guess("Fight Club");
        assert!(!session.submit_guess("Fight Club"));
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_hints_reveal_per_miss_capped_at_max() {
        let mut session = started_session();
        assert_eq!(session.hints.revealed(), 1);
        session.submit_guess("a");
        assert_eq!(session.hints.revealed(), 2);
        session.submit_guess("b");
        assert_eq!(session.hints.revealed(), 3);
        session.submit_guess("c");
        assert_eq!(session.hints.revealed(), 4);
        session.submit_guess("d");
        // Fourth miss ends the game; the reel was already exhausted.
        assert_eq!(session.hints.revealed(), 4);
        assert!(session.hints.revealed() <= session.config.max_attempts);
    }

    #[test]
    fn test_miss_status_expires_after_two_ticks() {
        let mut session = started_session();
        session.submit_guess("a");
        let status = session.status.clone().unwrap();
        assert_eq!(status.text, "Not it.");
        assert!(!status.urgent);

        session.on_tick();
        assert!(session.status.is_some());
        session.on_tick();
        assert!(session.status.is_none());
    }

    #[test]
    fn test_new_attempt_replaces_pending_status() {
        let mut session = started_session();
        session.submit_guess("a");
        session.on_tick();
        // Second miss resets the expiry instead of inheriting one tick left.
        session.submit_guess("b");
        session.on_tick();
        assert!(session.status.is_some());
        session.on_tick();
        assert!(session.status.is_none());
    }

    #[test]
    fn test_last_attempt_status_persists() {
        let mut session = started_session();
        session.submit_guess("a");
        session.submit_guess("b");
        session.submit_guess("c");

        let status = session.status.clone().unwrap();
        assert_eq!(status.text, "Last attempt!");
        assert!(status.urgent);
        assert_eq!(status.ticks_left, None);

        for _ in 0..10 {
            session.on_tick();
        }
        assert!(session.status.is_some());
    }

    #[test]
    fn test_status_cleared_when_session_ends() {
        let mut session = started_session();
        session.submit_guess("a");
        assert!(session.status.is_some());
        session.submit_guess("fight club");
        assert!(session.status.is_none());
    }

    #[test]
    fn test_skipped_guess_status() {
        let mut session = started_session();
        session.submit_guess("");
        assert_eq!(session.status.as_ref().unwrap().text, "Skipped.");
    }

    #[test]
    fn test_summary_only_when_finished() {
        let mut session = started_session();
        assert!(session.summary().is_none());
        session.submit_guess("fight club");

        let summary = session.summary().unwrap();
        assert!(summary.won);
        assert_eq!(summary.loss_reason, None);
        assert_eq!(summary.attempts_used, 0);
        assert_eq!(summary.revealed_answer, None);
    }

    #[test]
    fn test_hint_reel_capped_by_available_stills() {
        let mut session = Session::new(
            AnswerKey::new("a", "b"),
            SessionConfig {
                max_attempts: 8,
                ..SessionConfig::default()
            },
        )
        .with_hints(4);
        session.start();
        for _ in 0..7 {
            session.submit_guess("x");
        }
        assert_eq!(session.hints.revealed(), 4);
        assert_eq!(session.attempts_used, 7);
    }

    #[test]
    fn test_zero_attempt_config_loses_on_first_guess() {
        // A config file can carry max_attempts: 0 even though the CLI
        // rejects it; the first miss must end the game, not underflow.
        let mut session = Session::new(
            AnswerKey::new("a", "b"),
            SessionConfig {
                max_attempts: 0,
                ..SessionConfig::default()
            },
        );
        session.start();
        assert!(!session.submit_guess("wrong"));
        assert_eq!(session.phase, Phase::Lost(LossReason::AttemptsExhausted));
    }

    #[test]
    fn test_loss_reason_display() {
        assert_eq!(LossReason::TimeExpired.to_string(), "time expired");
        assert_eq!(LossReason::AttemptsExhausted.to_string(), "attempts exhausted");
    }
}
