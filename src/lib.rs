//! # kb-chat
//!
//! A knowledge-base-grounded chat assistant for the terminal.
//!
//! kb-chat lets you build a small in-memory knowledge base from pasted
//! text, manual Q&A entries, or uploaded text/markdown/PDF files, and
//! then converse with a hosted model that is instructed to answer
//! strictly from that knowledge base. There is no persistence and no
//! retrieval machinery: the whole knowledge text rides along on every
//! request.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────────┐   ┌─────────┐   ┌────────────┐
//! │ Ingestors  │──▶│ Knowledge │──▶│ Prompt  │──▶│ Completion │
//! │ text/QA/   │   │   Store   │   │ Builder │   │   Client   │
//! │ file (PDF) │   └───────────┘   └─────────┘   └─────┬──────┘
//! └────────────┘                                       │
//!                   ┌──────────────┐   ┌───────────────▼──┐
//!                   │     CLI      │◀──│  Chat Session /  │
//!                   │   (kbchat)   │   │ Turn Orchestrator│
//!                   └──────────────┘   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export GEMINI_API_KEY=...
//! kbchat chat                   # interactive session
//! kbchat prompt "What is your return policy?" --knowledge faq.md
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`knowledge`] | Append-only in-memory knowledge store |
//! | [`ingest`] | Manual text, Q&A, and file-upload ingestors |
//! | [`extract`] | File-kind detection and PDF page extraction |
//! | [`prompt`] | Grounded-prompt construction |
//! | [`completion`] | Hosted-model call boundary |
//! | [`chat`] | Conversation state and turn orchestration |

pub mod chat;
pub mod completion;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod knowledge;
pub mod prompt;
