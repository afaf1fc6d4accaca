//! Bracket codec: one bit per game, rendered as a fixed-length code, plus
//! phrase-derived codes.
//!
//! Bit order is play-in round first (when present), then each elimination
//! round in play order, games in game order. Bit 0 means the home team won,
//! bit 1 the away team; the first game is the most significant bit. The whole
//! sequence fits a `u128` (a 64-team field with an 8-team play-in is 67 bits).

use crate::logic::simulation::{
    build_named_round, build_round, score, substitute_play_in_winners,
};
use crate::models::{CodeScheme, Round, Team, Tournament, TournamentError, TournamentState};
use sha2::{Digest, Sha256};

const BASE36_SYMBOLS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const BASE64_SYMBOLS: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

impl CodeScheme {
    fn symbols(self) -> &'static [u8] {
        match self {
            CodeScheme::Base36 => BASE36_SYMBOLS,
            CodeScheme::Alphabet64 => BASE64_SYMBOLS,
        }
    }

    /// Smallest number of symbols that can carry `bits` outcome bits.
    pub fn natural_length(self, bits: usize) -> usize {
        match self {
            CodeScheme::Base36 => {
                let limit = if bits >= 128 {
                    u128::MAX
                } else {
                    (1u128 << bits) - 1
                };
                let mut length = 0;
                let mut capacity: u128 = 1;
                while capacity <= limit {
                    capacity = capacity.checked_mul(36).unwrap_or(u128::MAX);
                    length += 1;
                }
                length
            }
            CodeScheme::Alphabet64 => (bits + 5) / 6,
        }
    }

    /// Render `value` in this scheme's radix, left-padded with the zero symbol
    /// to exactly `length` symbols.
    pub fn encode_value(self, value: u128, length: usize) -> Result<String, TournamentError> {
        let symbols = self.symbols();
        let radix = symbols.len() as u128;
        let mut out = vec![symbols[0]; length];
        let mut rest = value;
        for slot in out.iter_mut().rev() {
            if rest == 0 {
                break;
            }
            *slot = symbols[(rest % radix) as usize];
            rest /= radix;
        }
        if rest != 0 {
            return Err(TournamentError::CodeLengthTooShort {
                needed: self.natural_length(128 - value.leading_zeros() as usize),
                configured: length,
            });
        }
        String::from_utf8(out)
            .map_err(|_| TournamentError::InvalidCode("non-ascii alphabet".to_string()))
    }

    /// Parse a code of exactly `length` symbols back to its integer value.
    /// Base 36 accepts either letter case; the 64-symbol alphabet is exact.
    pub fn decode_value(self, code: &str, length: usize) -> Result<u128, TournamentError> {
        let actual = code.chars().count();
        if actual != length {
            return Err(TournamentError::InvalidCode(format!(
                "expected {} characters, got {}",
                length, actual
            )));
        }
        let symbols = self.symbols();
        let radix = symbols.len() as u128;
        let mut value: u128 = 0;
        for ch in code.chars() {
            let normalized = match self {
                CodeScheme::Base36 => ch.to_ascii_lowercase(),
                CodeScheme::Alphabet64 => ch,
            };
            let digit = symbols
                .iter()
                .position(|&symbol| symbol as char == normalized)
                .ok_or_else(|| {
                    TournamentError::InvalidCode(format!(
                        "symbol '{}' is outside the code alphabet",
                        ch
                    ))
                })?;
            value = value
                .checked_mul(radix)
                .and_then(|v| v.checked_add(digit as u128))
                .ok_or_else(|| {
                    TournamentError::InvalidCode("code value overflows".to_string())
                })?;
        }
        Ok(value)
    }
}

/// Pack a completed bracket's outcomes into one integer, first game at the
/// most significant bit.
fn outcome_bits(tournament: &Tournament) -> Result<u128, TournamentError> {
    let mut value: u128 = 0;
    let mut count = 0;
    for round in tournament.all_rounds() {
        for game in &round.games {
            let bit = game.outcome_bit().ok_or(TournamentError::NotPlayed)?;
            value = (value << 1) | u128::from(bit);
            count += 1;
        }
    }
    if count != tournament.game_count() {
        return Err(TournamentError::NotPlayed);
    }
    Ok(value)
}

/// Encode a completed tournament into its canonical bracket code.
pub fn to_tourney_code(tournament: &Tournament) -> Result<String, TournamentError> {
    if !tournament.is_complete() {
        return Err(TournamentError::NotPlayed);
    }
    let value = outcome_bits(tournament)?;
    tournament
        .config
        .scheme
        .encode_value(value, tournament.config.code_length)
}

/// Cursor over the fixed-length outcome bit sequence of one bracket code.
/// Replaces destructive bit-string slicing with an explicit index.
struct BitCursor {
    value: u128,
    remaining: usize,
}

impl BitCursor {
    fn new(value: u128, bits: usize) -> Self {
        Self {
            value,
            remaining: bits,
        }
    }

    /// Next bit, most significant first. True means the away team won.
    fn next_bit(&mut self) -> bool {
        debug_assert!(self.remaining > 0);
        self.remaining -= 1;
        (self.value >> self.remaining) & 1 == 1
    }
}

/// Assign winners to every game in a round from the cursor, then aggregate.
fn assign_round(round: &mut Round, cursor: &mut BitCursor) {
    round.winners = Vec::with_capacity(round.games.len());
    for game in &mut round.games {
        let winner = if cursor.next_bit() {
            game.away_team.clone()
        } else {
            game.home_team.clone()
        };
        round.winners.push(game.set_winner(winner));
    }
    round.finish();
}

/// Rebuild the bracket deterministically from a code: validate, expand the
/// bits, assign each game's winner in order, and recompute the scores. No
/// randomness is involved; decoding the same code always yields the same
/// bracket. The code is validated before any state is touched.
pub fn load_from_tourney_code(
    tournament: &mut Tournament,
    code: &str,
) -> Result<Team, TournamentError> {
    let bits = tournament.game_count();
    let value = tournament
        .config
        .scheme
        .decode_value(code, tournament.config.code_length)?;
    if bits < 128 && value >> bits != 0 {
        return Err(TournamentError::InvalidCode(
            "code encodes more outcomes than the bracket has games".to_string(),
        ));
    }

    tournament.reset();
    tournament.state = TournamentState::InProgress;
    let mut cursor = BitCursor::new(value, bits);

    if !tournament.first_four.is_empty() {
        let mut round = build_named_round(
            &tournament.first_four,
            0,
            tournament.config.first_four_name.clone(),
            tournament.config.first_four_points,
            tournament.config.score_rule,
        );
        assign_round(&mut round, &mut cursor);
        let winners = round.winners.clone();
        substitute_play_in_winners(tournament, &winners);
        tournament.first_four_round = Some(round);
    }

    let mut contenders = tournament.teams.clone();
    let mut level = 0;
    while contenders.len() > 1 {
        let mut round = build_round(&contenders, level, &tournament.config)?;
        assign_round(&mut round, &mut cursor);
        contenders = round.winners.clone();
        tournament.rounds.push(round);
        level += 1;
    }
    let winner = contenders
        .into_iter()
        .next()
        .ok_or(TournamentError::InvalidFieldSize(0))?;

    score(tournament);
    tournament.winner = Some(winner.clone());
    tournament.state = TournamentState::Complete;
    tournament.code = Some(to_tourney_code(tournament)?);
    Ok(winner)
}

/// Deterministic code from an arbitrary phrase: SHA-256 of the phrase,
/// truncated to the bracket's bit length and rendered through the same radix
/// encoder as simulation codes, so the two are interchangeable decode inputs.
/// No games are played.
pub fn code_from_phrase(
    tournament: &Tournament,
    phrase: &str,
) -> Result<String, TournamentError> {
    let digest = Sha256::digest(phrase.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    let full = u128::from_be_bytes(bytes);

    let bits = tournament.game_count();
    let value = if bits >= 128 {
        full
    } else {
        full & ((1u128 << bits) - 1)
    };
    tournament
        .config
        .scheme
        .encode_value(value, tournament.config.code_length)
}
