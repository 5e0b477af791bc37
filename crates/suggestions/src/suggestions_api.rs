use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::query::ListQuery;
use crate::validation::ErrorBody;
use crate::{ApiConfig, NewWordSuggestion, SuggestionError, SuggestionUpdate, WordSuggestion};

const WORD_SUGGESTIONS_PATH: &str = "wordSuggestions";
const API_KEY_HEADER: &str = "X-API-Key";

pub(crate) fn endpoint(config: &ApiConfig, id: Option<&str>) -> Result<Url, SuggestionError> {
    let mut url = config.base_url.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| SuggestionError::InvalidBaseUrl(config.base_url.to_string()))?;
        segments.pop_if_empty().push(WORD_SUGGESTIONS_PATH);
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}

fn request(
    client: &reqwest::Client,
    config: &ApiConfig,
    method: Method,
    id: Option<&str>,
) -> Result<RequestBuilder, SuggestionError> {
    let url = endpoint(config, id)?;
    debug!(%method, %url, "sending word suggestion request");
    let mut req = client.request(method, url);
    if let Some(api_key) = &config.api_key {
        req = req.header(API_KEY_HEADER, api_key);
    }
    Ok(req)
}

async fn read<T: DeserializeOwned>(res: Response) -> Result<T, SuggestionError> {
    let status = res.status();
    if status.is_success() {
        return res.json::<T>().await.map_err(SuggestionError::Deserialize);
    }
    let message = match res.json::<ErrorBody>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => format!("request failed with status {status}"),
    };
    warn!(status = status.as_u16(), %message, "word suggestion request rejected");
    Err(SuggestionError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, SuggestionError> {
    let res = req.send().await.map_err(SuggestionError::Fetch)?;
    read(res).await
}

async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    req: RequestBuilder,
    body: &B,
) -> Result<T, SuggestionError> {
    send(req.json(body)).await
}

pub(crate) async fn suggest_new_word(
    client: &reqwest::Client,
    config: &ApiConfig,
    suggestion: &NewWordSuggestion,
) -> Result<WordSuggestion, SuggestionError> {
    let req = request(client, config, Method::POST, None)?;
    send_json(req, suggestion).await
}

pub(crate) async fn update_word_suggestion(
    client: &reqwest::Client,
    config: &ApiConfig,
    id: &str,
    update: &SuggestionUpdate,
) -> Result<WordSuggestion, SuggestionError> {
    let req = request(client, config, Method::PUT, Some(id))?;
    send_json(req, update).await
}

pub(crate) async fn get_word_suggestion(
    client: &reqwest::Client,
    config: &ApiConfig,
    id: &str,
) -> Result<WordSuggestion, SuggestionError> {
    send(request(client, config, Method::GET, Some(id))?).await
}

pub(crate) async fn get_word_suggestions(
    client: &reqwest::Client,
    config: &ApiConfig,
    query: &ListQuery,
) -> Result<Vec<WordSuggestion>, SuggestionError> {
    let req = request(client, config, Method::GET, None)?.query(&query.to_pairs());
    send(req).await
}

pub(crate) async fn delete_word_suggestion(
    client: &reqwest::Client,
    config: &ApiConfig,
    id: &str,
) -> Result<WordSuggestion, SuggestionError> {
    send(request(client, config, Method::DELETE, Some(id))?).await
}
