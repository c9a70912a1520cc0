//! User-facing strings, kept in one place.

pub const HEADER_SUFFIX: &str = "님";
pub const DEFAULT_HEADER: &str = "사용자";

pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const SESSION_EXPIRED: &str = "로그인이 만료되었습니다. 다시 로그인해주세요.";
pub const NETWORK_ERROR: &str = "네트워크 오류가 발생했습니다. 다시 시도해주세요.";
pub const LOGOUT_CONFIRM: &str = "로그아웃 하시겠습니까?";

pub const WORD_REQUIRED: &str = "분석할 영단어를 입력해주세요.";
pub const ENGLISH_ONLY: &str = "영어 단어만 입력해주세요.";
pub const BASIC_FIRST: &str = "먼저 기본 분석을 진행해주세요.";
pub const NO_CURRENT_WORD: &str = "분석할 단어가 없습니다. 기본 분석부터 진행해주세요.";

pub const BASIC_FAILED: &str = "분석 실패";
pub const BASIC_FALLBACK: &str = "분석 중 오류가 발생했습니다.";
pub const BASIC_PANEL_ERROR: &str = "분석 중 오류가 발생했습니다. 다시 시도해주세요.";
pub const ADVANCED_FAILED: &str = "심화 분석 실패";
pub const ADVANCED_FALLBACK: &str = "심화 분석 중 오류가 발생했습니다.";
pub const ADVANCED_PANEL_ERROR: &str = "심화 분석 중 오류가 발생했습니다. 다시 시도해주세요.";

pub const HISTORY_LOAD_ERROR: &str = "히스토리를 불러오는 중 오류가 발생했습니다.";
pub const NO_HISTORY: &str = "아직 분석한 단어가 없습니다.";
pub const NOTHING_TO_EXPORT: &str = "내보낼 히스토리가 없습니다.";
pub const POPUP_BLOCKED: &str = "팝업이 차단되었습니다. 팝업을 허용하고 다시 시도해주세요.";
pub const EXPORT_FAILED: &str = "인쇄 페이지 생성 중 오류가 발생했습니다";
pub const CLOSE_AFTER_PRINT: &str = "인쇄가 완료되었습니다. 창을 닫으시겠습니까?";

pub const ID_REQUIRED: &str = "ID를 입력해주세요.";
pub const ID_TOO_SHORT: &str = "ID는 3자 이상 입력해주세요.";
pub const EMAIL_REQUIRED: &str = "이메일을 입력해주세요.";
pub const EMAIL_INVALID: &str = "올바른 이메일 형식을 입력해주세요.";
pub const PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요.";
pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 4자 이상 입력해주세요.";

pub const REGISTER_OK: &str = "회원가입이 완료되었습니다! 로그인해주세요.";
pub const REGISTER_FALLBACK: &str = "회원가입 중 오류가 발생했습니다.";
pub const LOGIN_OK: &str = "로그인 성공! 영단어 분석기로 이동합니다.";
pub const LOGIN_FALLBACK: &str = "로그인에 실패했습니다.";

/// Header text for a signed-in user, e.g. `user123님`.
pub fn header_for(username: &str) -> String {
    format!("{username}{HEADER_SUFFIX}")
}

/// Alert text for a failed action: `{prefix}: {message}`.
pub fn failure_alert(prefix: &str, message: &str) -> String {
    format!("{prefix}: {message}")
}
