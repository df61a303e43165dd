use crate::common::{fixture, run};
use insta::assert_snapshot;
use serde_json::json;

#[test]
fn test_mdx_uses_jsx_comments_and_jsx_patterns() {
    let report = run(
        "docs/sign-in.mdx",
        &fixture("sign-in.mdx"),
        json!([
            { "checkLink": "https://app.example.com" },
            { "click": "Sign in" },
            { "screenshot": "/img/login.png" }
        ]),
    );

    assert_eq!(report.format, "mdx");
    assert_eq!(report.matched_steps, 3);
    assert_snapshot!(report.result, @r###"
import Tabs from '@theme/Tabs';

Open <a href="https://app.example.com">the app</a> in a browser.
{/* step {"checkLink":"https://app.example.com"} */}

Click **Sign in**.
{/* step {"click":"Sign in"} */}

<img src="/img/login.png" alt="Login" />
{/* step {"screenshot":"/img/login.png"} */}
"###);
}
