use serde::{Deserialize, Serialize};

/// 피드 상세 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDetails {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creator_username: Option<String>,
}

/// 피드를 구성하는 처리 단계 (플러그인 인스턴스)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInstance {
    pub id: u64,
    pub plugin_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub previous_id: Option<u64>,
}

/// 목록 API 응답 페이지 (`{ "data": { "results": [...] } }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsPayload<T> {
    pub data: ResultsPage<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> ResultsPayload<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self {
            data: ResultsPage { results },
        }
    }
}

pub type PluginInstancesPayload = ResultsPayload<PluginInstance>;

/// 피드 화면 상태 변경 액션
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    GetFeedDetailsSuccess(FeedDetails),
    GetPluginInstancesSuccess(PluginInstancesPayload),
    FetchRequest,
    FetchSuccess(PluginInstancesPayload),
    FetchError(String),
    FetchComplete,
    ResetState,
}

/// 피드 화면 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub details: Option<FeedDetails>,
    pub items: Option<Vec<PluginInstance>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 액션을 적용한 새 상태 반환
    ///
    /// 요청/에러/완료 액션은 상태를 바꾸지 않는다. 로딩/에러 표시는 호출자 몫이다.
    pub fn reduce(self, action: FeedAction) -> Self {
        match action {
            FeedAction::GetFeedDetailsSuccess(details) => Self {
                details: Some(details),
                ..self
            },
            FeedAction::GetPluginInstancesSuccess(payload) | FeedAction::FetchSuccess(payload) => {
                Self {
                    items: Some(payload.data.results),
                    ..self
                }
            }
            FeedAction::FetchError(message) => {
                tracing::warn!(%message, "feed fetch failed");
                self
            }
            FeedAction::FetchRequest | FeedAction::FetchComplete => self,
            FeedAction::ResetState => {
                tracing::debug!("feed state reset");
                Self::default()
            }
        }
    }

    /// id로 플러그인 인스턴스 찾기
    pub fn instance(&self, id: u64) -> Option<&PluginInstance> {
        self.items.as_ref()?.iter().find(|item| item.id == id)
    }
}
