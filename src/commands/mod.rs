// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod summary;
pub mod tax;
pub mod range;
pub mod history;
pub mod timeline;
pub mod exporter;
pub mod doctor;
pub mod config;
