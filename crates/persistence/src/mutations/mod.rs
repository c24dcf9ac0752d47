// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing statements.
//!
//! Every function here issues one or a few statements against the
//! connection it is given and never opens a transaction itself. Atomicity
//! across statements is the job of the `Executor` chosen in `lib.rs`.
//!
//! ## Module Organization
//!
//! - `terms`: Term resolution and in-place term edits
//! - `hackathons`: Hackathon rows, event assignment, sponsor links
//! - `participants`: The participation roster
//! - `applications`: Application rows and status

pub mod applications;
pub mod hackathons;
pub mod participants;
pub mod terms;
