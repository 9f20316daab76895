use crate::mode::PresentationMode;
use std::collections::HashSet;

/// Transcripts with fewer meaningful characters than this score 0: too
/// little data to call a delivery rate
const MIN_TRANSCRIPT_CHARS: usize = 6;

/// Boost applied to the sequence-similarity ratio before clamping
const SIMILARITY_BOOST: f64 = 1.05;

/// Boost applied to the keyword-subset ratio for non-informational modes
const KEYWORD_BOOST: f64 = 1.25;

/// Minimum token length for a script word to count as a keyword
const MIN_KEYWORD_CHARS: usize = 2;

/// How the script-vs-transcript match is computed.
///
/// Two materially different formulas with different score distributions;
/// both guarantee 0 on an empty or too-short transcript and clamp to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryStrategy {
    /// Character-level similarity between normalized script and transcript.
    /// The default: it is what a refined full-session transcript is scored
    /// with.
    #[default]
    SequenceSimilarity,
    /// Stop-word-filtered token-set intersection; full-script accuracy for
    /// informational mode, boosted key-message ratio for the others.
    TokenOverlap,
}

pub fn delivery_score(
    strategy: DeliveryStrategy,
    script: &str,
    transcript: &str,
    mode: PresentationMode,
    stopwords: &HashSet<String>,
) -> u8 {
    if meaningful_chars(transcript) < MIN_TRANSCRIPT_CHARS {
        return 0;
    }

    match strategy {
        DeliveryStrategy::SequenceSimilarity => sequence_similarity(script, transcript),
        DeliveryStrategy::TokenOverlap => token_overlap(script, transcript, mode, stopwords),
    }
}

fn meaningful_chars(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}

/// Punctuation-stripped character sequence used for similarity matching.
fn normalize(text: &str) -> Vec<char> {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Longest-common-subsequence similarity ratio, scaled and clamped.
fn sequence_similarity(script: &str, transcript: &str) -> u8 {
    let a = normalize(script);
    let b = normalize(transcript);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let lcs = lcs_length(&a, &b);
    let ratio = 2.0 * lcs as f64 / (a.len() + b.len()) as f64;
    let score = ratio * 100.0 * SIMILARITY_BOOST;
    score.clamp(0.0, 100.0) as u8
}

/// LCS length with a two-row DP table
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn token_overlap(
    script: &str,
    transcript: &str,
    mode: PresentationMode,
    stopwords: &HashSet<String>,
) -> u8 {
    let transcript_set: HashSet<String> = tokenize(transcript).into_iter().collect();

    match mode {
        PresentationMode::Informational => {
            // Full-script accuracy over every meaningful token
            let script_set: HashSet<String> = tokenize(script)
                .into_iter()
                .filter(|t| !stopwords.contains(t))
                .collect();
            if script_set.is_empty() {
                return 0;
            }
            let delivered = script_set.intersection(&transcript_set).count();
            ((delivered as f64 / script_set.len() as f64) * 100.0).clamp(0.0, 100.0) as u8
        }
        _ => {
            // Key-message ratio: did the important words get said at all
            let keywords: HashSet<String> = tokenize(script)
                .into_iter()
                .filter(|t| t.chars().count() >= MIN_KEYWORD_CHARS && !stopwords.contains(t))
                .collect();
            if keywords.is_empty() {
                return 0;
            }
            let delivered = keywords.intersection(&transcript_set).count();
            let score = delivered as f64 / keywords.len() as f64 * 100.0 * KEYWORD_BOOST;
            score.clamp(0.0, 100.0) as u8
        }
    }
}
