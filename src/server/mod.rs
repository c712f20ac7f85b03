//! Server-side API backend and business logic.
//!
//! This module contains the backend for the race registration API: HTTP endpoints,
//! the relationship engine keeping athletes, races and courses consistent, and the
//! document store they are persisted in. The backend uses Axum as the web framework and
//! SeaORM over SQLite for storage.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - CRUD, listing, identity verification and the relationship engine
//! - **Data Layer** (`data/`) - Document store operations and JSON encoding of documents
//! - **Model Layer** (`model/`) - Documents, reference lists and validated parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Caller identity, access guards, self links and content negotiation
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, identity verifier, link base)
//! - **Startup** (`startup`) - Initialization of database, HTTP client and identity verifier
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Util** (`util`) - Path/cursor parsing and field validation helpers
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** negotiates content type, resolves the caller and request links
//! 3. **Controller** checks access, converts DTOs to validated params, calls service
//! 4. **Service** reads affected documents and applies writes through the data layer
//! 5. **Controller** converts the resulting document to a DTO with `self` links

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
