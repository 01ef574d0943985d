//! Recipe and chat generation.
//!
//! [`RecipeGenerator`] is chosen once at startup: [`ExternalProvider`] talks to
//! a real text provider, [`MockProvider`] answers deterministically. Handlers
//! only see the trait object.

use super::metrics;
use super::providers::{FinishReason, GenerationParams, ImageInput, ProviderError, TextProvider};
use crate::cuisine::{
    build_chat_prompt, build_prompt, build_vision_prompt, normalize, normalize_food_analysis,
};
use crate::models::{
    AnalyzedImage, ChatReply, ChatRequest, FoodAnalysis, GeneratedRecipe, RecipeRecord,
    RecipeRequest,
};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Instant;

pub const MOCK_MODEL: &str = "Mock Service";
pub const FALLBACK_MODEL: &str = "fallback";

#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate_recipe(&self, request: &RecipeRequest)
    -> Result<GeneratedRecipe, ProviderError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError>;

    async fn analyze_image(
        &self,
        image: ImageInput<'_>,
        language: &str,
    ) -> Result<AnalyzedImage, ProviderError>;

    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Short backend name, e.g. `gemini` or `mock`.
    fn name(&self) -> &str;
}

/// Generator backed by a remote text provider.
pub struct ExternalProvider {
    name: String,
    provider: Arc<dyn TextProvider>,
}

impl ExternalProvider {
    pub fn new(name: impl Into<String>, provider: Arc<dyn TextProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }

    async fn complete(
        &self,
        prompt: &str,
        image: Option<ImageInput<'_>>,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let model = self.provider.model();
        let start = Instant::now();
        let result = match image {
            Some(image) => self.provider.generate_with_image(prompt, image, params).await,
            None => self.provider.generate(prompt, params).await,
        };
        metrics::record_provider_latency(&self.name, model, start.elapsed().as_secs_f64());

        match result {
            Ok(response) => {
                metrics::record_tokens(model, response.input_tokens, response.output_tokens);
                if response.finish_reason == FinishReason::Length {
                    tracing::warn!(
                        provider = %self.name,
                        model = %model,
                        "Provider output was truncated at the token limit"
                    );
                }
                Ok(response.text)
            }
            Err(e) => {
                metrics::record_provider_error(&self.name, e.kind());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl RecipeGenerator for ExternalProvider {
    async fn generate_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<GeneratedRecipe, ProviderError> {
        let prompt = build_prompt(
            &request.clean_ingredients(),
            &request.prompt_preferences(),
            &request.language,
        );

        let text = self.complete(&prompt, None, &GenerationParams::recipe()).await?;
        let recipe = normalize(&text, &request.language);

        tracing::info!(
            provider = %self.name,
            title = %recipe.title,
            structured = recipe.raw_response.is_none(),
            "Recipe generated"
        );

        Ok(GeneratedRecipe {
            recipe,
            ai_model: self.provider.model().to_string(),
            mock_data: false,
        })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError> {
        let prompt = build_chat_prompt(&request.message, &request.context, &request.language);
        let text = self.complete(&prompt, None, &GenerationParams::chat()).await?;

        Ok(ChatReply {
            response: text.trim().to_string(),
            model: self.provider.model().to_string(),
            language: request.language.clone(),
            suggestions: follow_up_suggestions(&request.language),
        })
    }

    async fn analyze_image(
        &self,
        image: ImageInput<'_>,
        language: &str,
    ) -> Result<AnalyzedImage, ProviderError> {
        let prompt = build_vision_prompt(language);
        let text = self
            .complete(&prompt, Some(image), &GenerationParams::vision())
            .await?;
        let analysis = normalize_food_analysis(&text, language);

        tracing::info!(
            provider = %self.name,
            detected_food = %analysis.detected_food,
            image_bytes = image.data.len(),
            "Image analyzed"
        );

        Ok(AnalyzedImage {
            analysis,
            model: self.provider.model().to_string(),
            mock_data: false,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Deterministic generator used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn recipe(request: &RecipeRequest) -> GeneratedRecipe {
        let vi = request.language == "vi";
        let ingredients = request.clean_ingredients();
        let ingredients_text = ingredients.join(", ");

        let (title, description, cooking_time) = if vi {
            (
                format!(
                    "Món ăn ngon từ {}",
                    ingredients.first().map_or("nguyên liệu", String::as_str)
                ),
                format!("Một món ăn tuyệt vời được tạo từ {}", ingredients_text),
                format!("{} phút", request.cooking_time),
            )
        } else {
            (
                format!(
                    "Delicious dish with {}",
                    ingredients.first().map_or("ingredients", String::as_str)
                ),
                format!("A wonderful dish made from {}", ingredients_text),
                format!("{} minutes", request.cooking_time),
            )
        };

        let instructions: &[&str] = if vi {
            &[
                "1. Chuẩn bị tất cả nguyên liệu",
                "2. Sơ chế nguyên liệu sạch sẽ",
                "3. Nấu theo phương pháp truyền thống",
                "4. Nêm nếm gia vị vừa ăn",
                "5. Trang trí và thưởng thức",
            ]
        } else {
            &[
                "1. Prepare all ingredients",
                "2. Clean and prep ingredients",
                "3. Cook using traditional methods",
                "4. Season to taste",
                "5. Garnish and serve",
            ]
        };

        let tips: &[&str] = if vi {
            &[
                "Chọn nguyên liệu tươi ngon",
                "Nêm nếm từ từ để đạt vị chuẩn",
                "Có thể thay đổi gia vị theo khẩu vị",
            ]
        } else {
            &[
                "Choose fresh ingredients",
                "Season gradually for best flavor",
                "Adjust spices to preference",
            ]
        };

        let nutrition = match json!({"calories": 350, "protein": "25g", "carbs": "40g", "fat": "12g"}) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        GeneratedRecipe {
            recipe: RecipeRecord {
                title,
                description,
                cooking_time: Some(cooking_time),
                difficulty: Some(request.difficulty.label(&request.language).to_string()),
                servings: Some(request.servings),
                ingredients: ingredients.iter().map(|i| format!("• {}", i)).collect(),
                instructions: instructions.iter().map(|s| s.to_string()).collect(),
                tips: tips.iter().map(|s| s.to_string()).collect(),
                nutrition,
                language: request.language.clone(),
                raw_response: None,
                extra: Map::new(),
            },
            ai_model: MOCK_MODEL.to_string(),
            mock_data: true,
        }
    }

    pub fn chat_reply(request: &ChatRequest) -> ChatReply {
        let response = if request.language == "vi" {
            format!(
                "Xin chào! Tôi là trợ lý AI nấu ăn. Bạn hỏi: '{}'. Tôi sẽ giúp bạn với những lời khuyên về nấu ăn tốt nhất!",
                request.message
            )
        } else {
            format!(
                "Hello! I'm your AI cooking assistant. You asked: '{}'. I'll help you with the best cooking advice!",
                request.message
            )
        };

        ChatReply {
            response,
            model: MOCK_MODEL.to_string(),
            language: request.language.clone(),
            suggestions: follow_up_suggestions(&request.language),
        }
    }

    /// Fixed analysis of a bowl of phở, whatever the picture shows.
    pub fn image_analysis(language: &str) -> AnalyzedImage {
        let vi = language == "vi";
        let nutrition = match json!({"calories": 400, "protein": "30g", "carbs": "50g"}) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let extra = match json!({
            "confidence": 0.95,
            "cuisine_type": "Vietnamese",
            "region": "mien_bac"
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        AnalyzedImage {
            analysis: FoodAnalysis {
                detected_food: "Phở bò Hà Nội".to_string(),
                description: if vi {
                    "Món phở truyền thống Việt Nam với nước dùng trong và thịt bò tươi"
                } else {
                    "Traditional Vietnamese phở with clear broth and fresh beef"
                }
                .to_string(),
                ingredients: ["Bánh phở", "Thịt bò", "Hành lá", "Ngò gai", "Giá đỗ", "Nước dùng"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                cooking_method: Some(
                    if vi {
                        "Ninh nước dùng, trụng bánh phở"
                    } else {
                        "Simmered broth, blanched noodles"
                    }
                    .to_string(),
                ),
                origin: Some("Hà Nội".to_string()),
                nutrition_estimate: nutrition,
                suggestions: follow_up_suggestions(language),
                raw_response: None,
                extra,
            },
            model: MOCK_MODEL.to_string(),
            mock_data: true,
        }
    }
}

#[async_trait]
impl RecipeGenerator for MockProvider {
    async fn generate_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<GeneratedRecipe, ProviderError> {
        Ok(Self::recipe(request))
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError> {
        Ok(Self::chat_reply(request))
    }

    async fn analyze_image(
        &self,
        _image: ImageInput<'_>,
        language: &str,
    ) -> Result<AnalyzedImage, ProviderError> {
        Ok(Self::image_analysis(language))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

const PHO_REPLY: &str = "Phở bò là món ăn đặc trưng của Việt Nam! Cách làm cơ bản:

Nguyên liệu chính:
- Xương bò: 1kg
- Thịt bò: 500g
- Bánh phở: 500g
- Hành tây: 2 củ
- Gừng: 100g
- Gia vị: hạt nêm, nước mắm, đường phèn

Cách làm:
1. Ninh xương bò 2-3 tiếng để có nước dùng trong
2. Nướng hành, gừng cho thơm
3. Luộc bánh phở, thái thịt bò mỏng
4. Trình bày và thưởng thức nóng";

const BANH_MI_REPLY: &str = "Bánh mì Việt Nam thơm ngon! Cách làm:

Nguyên liệu:
- Bánh mì giòn: 2 ổ
- Thịt nướng hoặc chả: 200g
- Đồ chua (cà rốt, củ cải): 100g
- Rau sống: xà lách, ngò gai, kinh giới
- Nước mắm pha loãng

Lắp bánh mì theo thứ tự: bánh, nước mắm, thịt, đồ chua, rau sống";

/// Canned reply used when the provider failed mid-request.
pub fn fallback_chat_reply(request: &ChatRequest) -> ChatReply {
    let message = request.message.to_lowercase();

    let response = if message.contains("phở") {
        PHO_REPLY.to_string()
    } else if message.contains("bánh mì") || message.contains("sandwich") {
        BANH_MI_REPLY.to_string()
    } else if request.language == "vi" {
        "Xin lỗi, tôi đang gặp sự cố kỹ thuật. Vui lòng thử lại sau.".to_string()
    } else {
        "Sorry, the AI service is currently unavailable. Please try again later.".to_string()
    };

    ChatReply {
        response,
        model: FALLBACK_MODEL.to_string(),
        language: request.language.clone(),
        suggestions: follow_up_suggestions(&request.language),
    }
}

fn follow_up_suggestions(language: &str) -> Vec<String> {
    let items: &[&str] = if language == "vi" {
        &[
            "Gợi ý món ăn từ nguyên liệu có sẵn",
            "Món ăn đặc sản theo vùng miền",
            "Mẹo nấu ăn nhanh cho ngày bận rộn",
        ]
    } else {
        &[
            "Suggest a dish from ingredients I have",
            "Regional Vietnamese specialties",
            "Quick cooking tips for busy days",
        ]
    };
    items.iter().map(|s| s.to_string()).collect()
}
