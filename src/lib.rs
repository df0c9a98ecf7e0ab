//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# tagwise

tagwise is a structured logging library built around a request-scoped [`context::Context`].

# Development status

tagwise is experimental and the API may change.

# The model

Key/value tags accumulate on an immutable [`context::Context`] as a request moves through
your program.  Each derived context shares its parent's tags, so handing a child context to a
helper costs one allocation and never copies the tags already attached.

When something is logged, a [`Logger`] snapshots the context's tags into an [`Entry`]
(time, caller file and line, message, tags, structured tags) and hands the entry to its
[`Emitter`].  Three emitters are provided:

| Emitter | Output |
|---|---|
| [`emitter::text::TextEmitter`] | `prefix time file:line: [k=v ...] message` lines |
| [`emitter::json::JsonEmitter`] | one JSON object per line |
| [`emitter::cloud::CloudEmitter`] | JSON lines for cloud log ingestion, with HTTP request, trace and severity fields |

Custom emitters implement [`Emitter`], or wrap a closure with [`EmitterFn`].

# The API

```rust
use tagwise::context::Context;
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption};

let out = MemorySink::new();
let logger = Logger::new([LoggerOption::to(out.clone())]);

let ctx = Context::background().add_tags(["request", "r-17", "user", "ada"]);
tagwise::printf!(logger, &ctx, "charged {} cents", 250);

assert_eq!(out.contents(), "[request=r-17 user=ada] charged 250 cents\n");
```

A disabled logger ([`Logger::disabled`]) accepts every call and does nothing, so libraries can
take a logger unconditionally.

For leveled logging, see [`leveled::LevelTagger`] (a `level` tag) and
[`emitter::cloud::SeverityLogger`] (a cloud severity with minimum-severity filtering).

# Multithreading

[`Context`](context::Context) is `Send + Sync` and cheap to clone, so it can be handed to
child threads and tasks along with the work.  Every emitter writes each record with a single
write under a lock, so lines from concurrent threads never interleave.
*/

pub mod context;
pub mod emitter;
mod entry;
pub mod global_logger;
mod inmemory_emitter;
mod level;
pub mod leveled;
mod logger;
mod macros;
pub mod pool;
pub mod sink;
mod sys;
mod tag;

pub use emitter::{Emitter, EmitterFn, TimestampFormat};
pub use entry::Entry;
pub use inmemory_emitter::InMemoryEmitter;
pub use level::Severity;
pub use logger::{Clock, Logger, LoggerOption};
pub use sys::Duration;
pub use tag::{StructuredTag, Tag, is_json_fragment};
