use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub coaching: CoachingConfig,
    pub collaborators: CollaboratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Directory where session WAV files are written
    pub recordings_path: String,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            recordings_path: "recordings".to_string(),
            sample_rate: 16000, // streaming recognizers expect 16kHz mono
            channels: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoachingConfig {
    /// Hesitation tokens counted against the fluency score
    pub filler_words: Vec<String>,
    /// Tokens excluded from delivery-match keyword sets
    pub stopwords: Vec<String>,
    /// Sentence endings counted as formal register
    pub formal_endings: Vec<String>,
    /// Sentence endings counted as conversational register
    pub casual_endings: Vec<String>,
    /// Path of the append-only composite score history
    pub history_path: String,
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            filler_words: [
                "어", "음", "그", "뭐", "막", "이제", "좀", "그러니까", "일단",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            stopwords: [
                "있습니다", "하겠습니다", "합니다", "있는", "것입니다", "생각합니다",
                "저는", "제가", "저희", "우리", "이번", "통해", "대해", "관한", "관련",
                "가장", "매우", "정말", "특히", "바로", "모두", "다시", "먼저", "다음",
                "때문에", "그리고", "하지만", "그러나", "그래서", "또한", "결국",
                "부분", "측면", "가지", "정도", "경우", "사실", "내용", "결과", "진행",
                "발표", "주제", "시간", "자료", "준비", "시작", "마무리", "이상", "감사",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            formal_endings: ["입니다", "습니다", "합니까", "습니까", "됩니다"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            casual_endings: ["에요", "아요", "어요", "나요", "하죠", "되죠", "인데요"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            history_path: "score_history.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    /// Language hint passed to the offline transcription engine
    pub language: String,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            language: "ko".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
