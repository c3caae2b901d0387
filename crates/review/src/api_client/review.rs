use crate::{
    abstract_trait::ReviewApiClientTrait,
    domain::{
        requests::reaction::{AddReactionRequest, DeleteReactionRequest},
        response::{api::ApiResponse, reaction::ReactionResponse},
    },
};
use async_trait::async_trait;
use shared::{errors::HttpError, http::HttpClient};

pub struct ReviewApiClient {
    http: HttpClient,
}

impl ReviewApiClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn wrap(response: ReactionResponse) -> ApiResponse<ReactionResponse> {
        ApiResponse {
            status: "success".to_string(),
            message: "OK".to_string(),
            data: response,
        }
    }
}

#[async_trait]
impl ReviewApiClientTrait for ReviewApiClient {
    async fn add_reaction(
        &self,
        req: &AddReactionRequest,
    ) -> Result<ApiResponse<ReactionResponse>, HttpError> {
        let response: ReactionResponse = self.http.post("/reviews/reactions", req).await?;

        Ok(Self::wrap(response))
    }

    async fn delete_reaction(
        &self,
        req: &DeleteReactionRequest,
    ) -> Result<ApiResponse<ReactionResponse>, HttpError> {
        let response: ReactionResponse = self.http.post("/reviews/reactions/delete", req).await?;

        Ok(Self::wrap(response))
    }
}
