#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use examprep_server::{
    errors::AppResult,
    llm::{LanguageModel, LlmError, StructuredRequest, TextRequest},
    models::domain::{question_key, Answer, Community, Discussion, Question},
    queue::{MessageQueue, QueueMessage},
    repositories::{AnswerRepository, CommunityRepository, QuestionRepository},
};

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<String, Question>>,
}

impl InMemoryQuestionRepository {
    pub async fn put(&self, question: Question) {
        self.questions
            .write()
            .await
            .insert(question_key(&question.test_id, question.number), question);
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find(&self, test_id: &str, number: u32) -> AppResult<Option<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .get(&question_key(test_id, number))
            .cloned())
    }
}

/// Records every upsert so tests can count writes.
#[derive(Default)]
pub struct RecordingAnswerRepository {
    answers: RwLock<HashMap<String, Answer>>,
    pub upserts: Mutex<Vec<Answer>>,
}

#[async_trait]
impl AnswerRepository for RecordingAnswerRepository {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Answer>> {
        Ok(self
            .answers
            .read()
            .await
            .get(&question_key(test_id, question_number))
            .cloned())
    }

    async fn upsert(&self, answer: Answer) -> AppResult<Answer> {
        self.upserts.lock().await.push(answer.clone());
        self.answers
            .write()
            .await
            .insert(answer.id.clone(), answer.clone());
        Ok(answer)
    }
}

impl RecordingAnswerRepository {
    pub async fn stored(&self) -> Vec<Answer> {
        self.answers.read().await.values().cloned().collect()
    }
}

#[derive(Default)]
pub struct RecordingCommunityRepository {
    communities: RwLock<HashMap<String, Community>>,
    pub upserts: Mutex<Vec<Community>>,
}

#[async_trait]
impl CommunityRepository for RecordingCommunityRepository {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Community>> {
        Ok(self
            .communities
            .read()
            .await
            .get(&question_key(test_id, question_number))
            .cloned())
    }

    async fn upsert(&self, community: Community) -> AppResult<Community> {
        self.upserts.lock().await.push(community.clone());
        self.communities
            .write()
            .await
            .insert(community.id.clone(), community.clone());
        Ok(community)
    }
}

/// FIFO queue without visibility timeouts; received messages stay queued
/// until deleted.
#[derive(Default)]
pub struct SimpleQueue {
    messages: Mutex<HashMap<String, Vec<QueueMessage>>>,
    sequence: Mutex<u64>,
}

impl SimpleQueue {
    pub async fn len(&self, queue: &str) -> usize {
        self.messages
            .lock()
            .await
            .get(queue)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl MessageQueue for SimpleQueue {
    async fn send(&self, queue: &str, body: String) -> AppResult<()> {
        let mut sequence = self.sequence.lock().await;
        *sequence += 1;
        self.messages
            .lock()
            .await
            .entry(queue.to_string())
            .or_default()
            .push(QueueMessage {
                id: format!("m{}", *sequence),
                body,
                dequeue_count: 0,
            });
        Ok(())
    }

    async fn receive(
        &self,
        queue: &str,
        _visibility_timeout: Duration,
    ) -> AppResult<Option<QueueMessage>> {
        let mut messages = self.messages.lock().await;
        Ok(messages
            .get_mut(queue)
            .and_then(|queued| queued.first_mut())
            .map(|message| {
                message.dequeue_count += 1;
                message.clone()
            }))
    }

    async fn delete(&self, queue: &str, message_id: &str) -> AppResult<()> {
        if let Some(queued) = self.messages.lock().await.get_mut(queue) {
            queued.retain(|m| m.id != message_id);
        }
        Ok(())
    }
}

/// Language model that replays scripted responses in order and counts calls.
#[derive(Default)]
pub struct ScriptedModel {
    structured: Mutex<Vec<Result<Option<Value>, LlmError>>>,
    text: Mutex<Vec<Result<Option<String>, LlmError>>>,
    pub structured_calls: Mutex<u32>,
    pub text_calls: Mutex<u32>,
}

impl ScriptedModel {
    pub fn structured(responses: Vec<Result<Option<Value>, LlmError>>) -> Self {
        Self {
            structured: Mutex::new(responses),
            ..Self::default()
        }
    }

    pub fn text(responses: Vec<Result<Option<String>, LlmError>>) -> Self {
        Self {
            text: Mutex::new(responses),
            ..Self::default()
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete_structured(
        &self,
        _request: StructuredRequest,
    ) -> Result<Option<Value>, LlmError> {
        *self.structured_calls.lock().await += 1;
        let mut responses = self.structured.lock().await;
        if responses.is_empty() {
            Ok(None)
        } else {
            responses.remove(0)
        }
    }

    async fn complete_text(&self, _request: TextRequest) -> Result<Option<String>, LlmError> {
        *self.text_calls.lock().await += 1;
        let mut responses = self.text.lock().await;
        if responses.is_empty() {
            Ok(None)
        } else {
            responses.remove(0)
        }
    }
}

pub fn question(test_id: &str, number: u32) -> Question {
    let mut question = Question::new(
        test_id,
        number,
        vec![
            "A company needs durable storage for images.".to_string(),
            "https://example.com/diagram.png".to_string(),
        ],
        vec![
            Some("Amazon S3".to_string()),
            Some("Amazon EBS".to_string()),
            Some("Instance store".to_string()),
            None,
        ],
        1,
    );
    question.indicate_subject_img_idxes = Some(vec![1]);
    question.indicate_choice_imgs = Some(vec![
        None,
        None,
        None,
        Some("https://example.com/choice-d.png".to_string()),
    ]);
    question.discussions = Some(vec![
        Discussion {
            comment: "S3 is the durable option".to_string(),
            upvoted_num: 8,
            selected_answer: Some("A".to_string()),
        },
        Discussion {
            comment: "Agree".to_string(),
            upvoted_num: 1,
            selected_answer: Some("A".to_string()),
        },
        Discussion {
            comment: "Not sure".to_string(),
            upvoted_num: 0,
            selected_answer: None,
        },
    ]);
    question
}
