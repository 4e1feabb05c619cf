use std::path::{Path, PathBuf};
use std::sync::Mutex;

use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};
use summarist::{Job, PromptTemplate, RunOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TEMPLATE: &str =
    "Summarize for the digest:\n\n{{ insert blog post or raw dev thread here }}\n";

/// Answers every prompt with a canned reply and remembers what it was asked.
pub(crate) struct StubLlmProvider {
    default_reply: String,
    /// `(needle, reply)`: prompts containing `needle` get `reply` instead.
    replies: Vec<(String, String)>,
    failing: bool,
    prompts: Mutex<Vec<String>>,
}

impl StubLlmProvider {
    pub fn new(default_reply: &str) -> Self {
        StubLlmProvider {
            default_reply: default_reply.to_owned(),
            replies: Vec::new(),
            failing: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        StubLlmProvider {
            failing: true,
            ..Self::new("")
        }
    }

    pub fn with_reply(mut self, needle: &str, reply: &str) -> Self {
        self.replies.push((needle.to_owned(), reply.to_owned()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    fn reply_to(&self, prompt: &str) -> String {
        self.replies
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map_or_else(|| self.default_reply.clone(), |(_, reply)| reply.clone())
    }
}

impl ChatProvider for StubLlmProvider {
    fn chat<'life0, 'life1, 'async_trait>(
        &'life0 self,
        messages: &'life1 [ChatMessage],
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            #[derive(Debug)]
            struct StringResponse(String);

            impl ChatResponse for StringResponse {
                fn text(&self) -> Option<String> {
                    Some(self.0.clone())
                }

                fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
                    panic!()
                }

                fn thinking(&self) -> Option<String> {
                    None
                }

                fn usage(&self) -> Option<llm::chat::Usage> {
                    None
                }
            }

            impl std::fmt::Display for StringResponse {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(formatter, "{}", self.0)
                }
            }

            let prompt = messages
                .iter()
                .map(|message| message.content.clone())
                .collect::<Vec<_>>()
                .join("\n");
            self.prompts
                .lock()
                .expect("prompt log poisoned")
                .push(prompt.clone());

            if self.failing {
                return Err(LLMError::ProviderError("stub provider is down".to_owned()));
            }

            Ok(Box::new(StringResponse(self.reply_to(&prompt))) as Box<dyn ChatResponse>)
        })
    }

    fn chat_with_tools<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
        _tools: Option<&'life2 [Tool]>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!()
    }
}

pub fn test_template() -> PromptTemplate {
    PromptTemplate::from(TEST_TEMPLATE)
}

pub fn write_template(dir: &Path) -> PathBuf {
    let prompt_file = dir.join("prompt.txt");
    std::fs::write(&prompt_file, TEST_TEMPLATE).expect("Failed to write prompt file");
    prompt_file
}

pub fn batch_options(dir: &Path, prompt_file: PathBuf) -> RunOptions {
    RunOptions {
        prompt_file,
        job: Job::Batch {
            list_file: dir.join("urls.txt"),
            output_dir: dir.join("summaries"),
        },
    }
}

/// Serves `html` at `route` on the mock server.
pub async fn mount_page(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub fn article(body: &str) -> String {
    format!(
        "<html><head><title>Post</title><script>track()</script></head>\
         <body><h1>Heading</h1><p>{body}</p><p>Second paragraph.</p></body></html>"
    )
}
