// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let captions = folio::parse_captions(data);
    for (file_name, caption) in captions.entries() {
        assert!(!file_name.is_empty());
        assert!(!caption.is_empty());
        assert_eq!(file_name, file_name.trim());
        assert_eq!(caption, caption.trim());
    }
});
