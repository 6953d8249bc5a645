//! Built-in rule tables
//!
//! One consolidated, versioned copy of every keyword table. Literal patterns
//! are stored lowercase because the matcher lowercases the body once and uses
//! substring search; CAPTCHA groups are regex source strings compiled
//! case-insensitively in `mod.rs`.

/// Gateway rules: (key, display name, literal pattern group)
pub(super) const GATEWAY_RULES: &[(&str, &str, &[&str])] = &[
    (
        "stripe",
        "Stripe",
        &[
            "stripe.com",
            "api.stripe.com/v1",
            "js.stripe.com",
            "stripe.js",
            "stripe.min.js",
            "client_secret",
            "payment_intent",
            "data-stripe",
            "stripe-payment-element",
            "stripe-elements",
            "stripe-checkout",
            "hooks.stripe.com",
            "m.stripe.network",
            "stripe__input",
            "stripe-card-element",
            "stripe-v3ds",
            "confirmcardpayment",
            "createpaymentmethod",
            "stripepublickey",
            "stripe(",
            "stripe.handlecardaction",
            "elements.create",
            "js.stripe.com/v3",
            "stripe.createtoken",
            "stripe-payment-request",
            "stripe__frame",
            "api.stripe.com/v1/payment_methods",
            "api.stripe.com/v1/tokens",
        ],
    ),
    (
        "paypal",
        "PayPal",
        &[
            "api.paypal.com",
            "paypal.com",
            "paypal-sdk.com",
            "paypal.js",
            "paypalobjects.com",
            "paypal-button",
            "paypal-checkout-sdk",
            "paypal-sdk.js",
            "paypal-smart-button",
            "paypal-rest-sdk",
            "paypal-transaction",
            "paypal.buttons",
            "data-paypal-client-id",
            "paypal.com/sdk/js",
            "paypal.order.create",
            "paypal-checkout-component",
            "api-m.paypal.com",
            "paypal-funding",
            "paypal-hosted-fields",
            "paypal-transaction-id",
        ],
    ),
    (
        "braintree",
        "Braintree",
        &[
            "api.braintreegateway.com/v1",
            "braintreepayments.com",
            "js.braintreegateway.com",
            "client_token",
            "braintree.js",
            "braintree-hosted-fields",
            "braintree-dropin",
            "braintree-v3",
            "braintree-client",
            "braintree-data-collector",
            "braintree-payment-form",
            "braintree-3ds-verify",
            "client.create",
            "braintree.min.js",
            "assets.braintreegateway.com",
            "braintree.setup",
            "data-braintree",
            "braintree.tokenize",
            "braintree-dropin-ui",
        ],
    ),
    (
        "adyen",
        "Adyen",
        &[
            "checkoutshopper-live.adyen.com",
            "adyen.com/hpp",
            "adyen.js",
            "data-adyen",
            "adyen-checkout",
            "adyen-payment",
            "adyen-components",
            "adyen-encrypted-data",
            "adyen-cse",
            "adyen-dropin",
            "adyen-web-checkout",
            "live.adyen-services.com",
            "adyen.encrypt",
            "checkoutshopper-test.adyen.com",
            "adyen-checkout__component",
            "adyen.com/v1",
            "adyen-payment-method",
            "adyen-action",
            "adyen.min.js",
        ],
    ),
    (
        "authorize.net",
        "Authorize.Net",
        &[
            "authorize.net/gateway/transact.dll",
            "js.authorize.net/v1/accept.js",
            "js.authorize.net",
            "anet.js",
            "data-authorize",
            "authorize-payment",
            "apitest.authorize.net",
            "accept.authorize.net",
            "api.authorize.net",
            "authorize-hosted-form",
            "merchantauthentication",
            "data-api-login-id",
            "data-client-key",
            "accept.dispatchdata",
            "api.authorize.net/xml/v1",
            "accept.authorize.net/payment",
            "authorize.net/profile",
        ],
    ),
    (
        "square",
        "Square",
        &[
            "squareup.com",
            "js.squarecdn.com",
            "square.js",
            "data-square",
            "square-payment-form",
            "square-checkout-sdk",
            "connect.squareup.com",
            "square.min.js",
            "squarecdn.com",
            "squareupsandbox.com",
            "sandbox.web.squarecdn.com",
            "square-payment-flow",
            "square.card",
            "squareup.com/payments",
            "data-square-application-id",
            "square.createpayment",
        ],
    ),
    (
        "klarna",
        "Klarna",
        &[
            "klarna.com",
            "js.klarna.com",
            "klarna.js",
            "data-klarna",
            "klarna-checkout",
            "klarna-onsite-messaging",
            "playground.klarna.com",
            "klarna-payments",
            "klarna.min.js",
            "klarna-order-id",
            "klarna-checkout-container",
            "klarna-load",
            "api.klarna.com",
        ],
    ),
    (
        "checkout.com",
        "Checkout.com",
        &[
            "api.checkout.com",
            "cko.js",
            "data-checkout",
            "checkout-sdk",
            "checkout-payment",
            "js.checkout.com",
            "secure.checkout.com",
            "checkout.frames.js",
            "api.sandbox.checkout.com",
            "cko-payment-token",
            "checkout.init",
            "cko-hosted",
            "checkout.com/v2",
            "cko-card-token",
        ],
    ),
    (
        "razorpay",
        "Razorpay",
        &[
            "checkout.razorpay.com",
            "razorpay.js",
            "data-razorpay",
            "razorpay-checkout",
            "razorpay-payment-api",
            "razorpay-sdk",
            "razorpay-payment-button",
            "razorpay-order-id",
            "api.razorpay.com",
            "razorpay.min.js",
            "payment_box payment_method_razorpay",
            "cdn.razorpay.com",
            "rzp_payment_icon.svg",
            "razorpay.checkout",
            "data-razorpay-key",
            "razorpay_payment_id",
            "checkout.razorpay.com/v1",
            "razorpay-hosted",
        ],
    ),
    (
        "paytm",
        "Paytm",
        &[
            "securegw.paytm.in",
            "api.paytm.com",
            "paytm.js",
            "data-paytm",
            "paytm-checkout",
            "paytm-payment-sdk",
            "paytm-wallet",
            "paytm.allinonesdk",
            "securegw-stage.paytm.in",
            "paytm.min.js",
            "paytm-transaction-id",
            "paytm.invoke",
            "paytm-checkout-js",
            "data-paytm-order-id",
        ],
    ),
    (
        "shopify_payments",
        "Shopify Payments",
        &[
            "pay.shopify.com",
            "data-shopify-payments",
            "shopify-checkout-sdk",
            "shopify-payment-api",
            "shopify-sdk",
            "shopify-express-checkout",
            "shopify_payments.js",
            "checkout.shopify.com",
            "shopify-payment-token",
            "shopify.card",
            "shopify-checkout-api",
            "data-shopify-checkout",
            "shopify.com/api",
        ],
    ),
    (
        "worldpay",
        "Worldpay",
        &[
            "secure.worldpay.com",
            "worldpay.js",
            "data-worldpay",
            "worldpay-checkout",
            "worldpay-payment-sdk",
            "worldpay-secure",
            "secure-test.worldpay.com",
            "worldpay.min.js",
            "worldpay.token",
            "worldpay-payment-form",
            "access.worldpay.com",
            "worldpay-3ds",
            "data-worldpay-token",
        ],
    ),
    (
        "2checkout",
        "2Checkout",
        &[
            "www.2checkout.com",
            "2co.js",
            "data-2checkout",
            "2checkout-payment",
            "secure.2co.com",
            "2checkout-hosted",
            "api.2checkout.com",
            "2co.min.js",
            "2checkout.token",
            "2co-checkout",
            "data-2co-seller-id",
            "2checkout.convertplus",
            "secure.2co.com/v2",
        ],
    ),
    (
        "amazon_pay",
        "Amazon Pay",
        &[
            "payments.amazon.com",
            "amazonpay.js",
            "data-amazon-pay",
            "amazon-pay-button",
            "amazon-pay-checkout-sdk",
            "amazon-pay-wallet",
            "amazon-checkout.js",
            "payments.amazon.com/v2",
            "amazon-pay-token",
            "amazon-pay-sdk",
            "data-amazon-pay-merchant-id",
            "amazon-pay-signin",
            "amazon-pay-checkout-session",
        ],
    ),
    (
        "apple_pay",
        "Apple Pay",
        &[
            "apple-pay.js",
            "data-apple-pay",
            "apple-pay-button",
            "apple-pay-checkout-sdk",
            "apple-pay-session",
            "apple-pay-payment-request",
            "applepaysession",
            "apple-pay-merchant-id",
            "apple-pay-payment",
            "apple-pay-sdk",
            "data-apple-pay-token",
            "apple-pay-checkout",
            "apple-pay-domain",
        ],
    ),
    (
        "google_pay",
        "Google Pay",
        &[
            "pay.google.com",
            "googlepay.js",
            "data-google-pay",
            "google-pay-button",
            "google-pay-checkout-sdk",
            "google-pay-tokenization",
            "payments.googleapis.com",
            "google.payments.api",
            "google-pay-token",
            "google-pay-payment-method",
            "data-google-pay-merchant-id",
            "google-pay-checkout",
            "google-pay-sdk",
        ],
    ),
    (
        "mollie",
        "Mollie",
        &[
            "api.mollie.com",
            "mollie.js",
            "data-mollie",
            "mollie-checkout",
            "mollie-payment-sdk",
            "mollie-components",
            "mollie.min.js",
            "profile.mollie.com",
            "mollie-payment-token",
            "mollie-create-payment",
            "data-mollie-profile-id",
            "mollie-checkout-form",
            "mollie-redirect",
        ],
    ),
    (
        "opayo",
        "Opayo",
        &[
            "live.opayo.eu",
            "opayo.js",
            "data-opayo",
            "opayo-checkout",
            "opayo-payment-sdk",
            "opayo-form",
            "test.opayo.eu",
            "opayo.min.js",
            "opayo-payment-token",
            "opayo-3ds",
            "data-opayo-merchant-id",
            "opayo-hosted",
            "opayo.api",
        ],
    ),
    (
        "paddle",
        "Paddle",
        &[
            "checkout.paddle.com",
            "paddle_button.js",
            "paddle.js",
            "data-paddle",
            "paddle-checkout-sdk",
            "paddle-product-id",
            "api.paddle.com",
            "paddle.min.js",
            "paddle-checkout",
            "data-paddle-vendor-id",
            "paddle.checkout.open",
            "paddle-transaction-id",
            "paddle-hosted",
        ],
    ),
];

/// CAPTCHA vendor rules: (display name, regex pattern group)
pub(super) const CAPTCHA_RULES: &[(&str, &[&str])] = &[
    (
        "reCaptcha",
        &[
            "g-recaptcha",
            "recaptcha/api\\.js",
            "data-sitekey",
            "nocaptcha",
            "recaptcha\\.net",
            "www\\.google\\.com/recaptcha",
            "grecaptcha\\.execute",
            "grecaptcha\\.render",
            "grecaptcha\\.ready",
            "recaptcha-token",
        ],
    ),
    (
        "hCaptcha",
        &[
            "hcaptcha",
            "assets\\.hcaptcha\\.com",
            "hcaptcha\\.com/1/api\\.js",
            "data-hcaptcha-sitekey",
            "hcaptcha-invisible",
            "hcaptcha\\.execute",
        ],
    ),
    (
        "Turnstile",
        &[
            "turnstile",
            "challenges\\.cloudflare\\.com",
            "cf-turnstile-response",
            "__cf_chl_",
            "cf_clearance",
        ],
    ),
    (
        "Arkose Labs",
        &[
            "arkose-labs",
            "funcaptcha",
            "client-api\\.arkoselabs\\.com",
            "fc-token",
            "fc-widget",
            "arkose",
            "press and hold",
            "funcaptcha\\.com",
        ],
    ),
    (
        "GeeTest",
        &[
            "geetest",
            "gt_captcha_obj",
            "gt\\.js",
            "geetest_challenge",
            "geetest_validate",
            "geetest_seccode",
        ],
    ),
    (
        "BotDetect",
        &[
            "botdetectcaptcha",
            "botdetect",
            "bdc_captchaimage",
            "captchacodetextbox",
        ],
    ),
    (
        "KeyCAPTCHA",
        &["keycaptcha", "kc_submit", "kc__widget", "s_kc_cid"],
    ),
    (
        "Anti Bot Detection",
        &[
            "fingerprintjs",
            "js\\.challenge",
            "checking your browser",
            "verify you are human",
            "please enable javascript and cookies",
            "sec-ch-ua-platform",
        ],
    ),
    (
        "Captcha",
        &[
            "captcha-container",
            "captcha-box",
            "captcha-frame",
            "captcha_input",
            "id=\"captcha\"",
            "class=\"captcha\"",
            "iframe.+?captcha",
            "data-captcha-sitekey",
        ],
    ),
];

/// Platform rules: (keyword, display name)
pub(super) const PLATFORM_RULES: &[(&str, &str)] = &[
    ("woocommerce", "WooCommerce"),
    ("shopify", "Shopify"),
    ("magento", "Magento"),
    ("bigcommerce", "BigCommerce"),
    ("prestashop", "PrestaShop"),
    ("opencart", "OpenCart"),
    ("wix", "Wix"),
    ("squarespace", "Squarespace"),
];

/// Card brand keywords
pub(super) const CARD_KEYWORDS: &[&str] = &[
    "visa",
    "mastercard",
    "amex",
    "discover",
    "diners",
    "jcb",
    "unionpay",
    "maestro",
    "mir",
    "rupay",
    "cartasi",
    "hipercard",
];

/// 3-D Secure correlation patterns
pub(super) const THREE_D_SECURE_PATTERNS: &[&str] = &[
    "three_d_secure",
    "3dsecure",
    "acs_url",
    "acsurl",
    "secure-auth",
    "three_d_secure_usage",
    "3ds",
    "3ds1",
    "3ds2",
    "tdsecure",
    "3d-secure",
    "three-d",
    "3dcheck",
    "3d-auth",
    "three-ds",
    "stripe.com/3ds",
    "m.stripe.network",
    "hooks.stripe.com/3ds",
    "paddle_frame",
    "paddlejs",
    "secure.paddle.com",
    "buy.paddle.com",
    "idcheck",
    "adyen.com/hpp",
    "adyen.com/checkout",
    "adyenpayments.com/3ds",
    "auth.razorpay.com",
    "razorpay.com/3ds",
    "secure.razorpay.com",
    "3ds.braintreegateway.com",
    "verify.3ds",
    "checkout.com/3ds",
    "checkout.com/challenge",
    "3ds.paypal.com",
    "authentication.klarna.com",
    "secure.klarna.com/3ds",
];

/// Cloudflare identifier set
pub(super) const CLOUDFLARE_IDENTIFIERS: &[&str] = &["cloudflare", "cf-ray", "cf-chl-bypass"];

/// Off-site payment-processor hosts the crawler may follow
///
/// Hosted checkout and redirect flows land on these domains; they are in
/// scope even though they are outside the root's registrable domain.
pub(super) const PAYMENT_DOMAINS: &[&str] = &[
    "stripe.com",
    "paypal.com",
    "paypalobjects.com",
    "braintreegateway.com",
    "braintreepayments.com",
    "adyen.com",
    "authorize.net",
    "squareup.com",
    "squarecdn.com",
    "klarna.com",
    "checkout.com",
    "razorpay.com",
    "paytm.in",
    "paytm.com",
    "shopify.com",
    "worldpay.com",
    "2checkout.com",
    "2co.com",
    "amazon.com",
    "mollie.com",
    "opayo.eu",
    "paddle.com",
];

/// Payment-intent keywords for link scoring
pub(super) const INTENT_KEYWORDS: &[&str] = &[
    "cart",
    "checkout",
    "pay",
    "payment",
    "buy",
    "order",
    "subscribe",
    "subscription",
    "pricing",
    "plans",
    "billing",
    "purchase",
    "donate",
    "shop",
    "store",
    "product",
];

/// Non-HTML extensions: fetched for classification, never expanded
pub(super) const ASSET_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".woff", ".woff2",
    ".ttf", ".otf", ".eot", ".mp4", ".webm", ".avi", ".mov", ".pdf", ".zip",
];
