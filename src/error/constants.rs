use super::const_error;

const_error!(INTERNAL, INTERNAL_SERVER_ERROR, "INTERNAL", "internal server error");
const_error!(
    JSON_MISSING_FIELDS,
    UNPROCESSABLE_ENTITY,
    "MISSING_FIELDS",
    "missing fields"
);
const_error!(JSON_SYNTAX_ERROR, BAD_REQUEST, "BAD_REQUEST", "syntax error");
const_error!(
    JSON_CONTENT_TYPE,
    BAD_REQUEST,
    "BAD_REQUEST",
    "missing or wrong content-type"
);
const_error!(JSON_VALIDATE_INVALID, BAD_REQUEST, "BAD_REQUEST", "invalid data");
const_error!(QUERY_INVALID, BAD_REQUEST, "BAD_REQUEST", "invalid query parameters");
const_error!(TEAM_EXISTS, BAD_REQUEST, "TEAM_EXISTS", "team_name already exists");
const_error!(PR_EXISTS, CONFLICT, "PR_EXISTS", "PR id already exists");
const_error!(PR_MERGED, CONFLICT, "PR_MERGED", "cannot reassign on merged PR");
const_error!(
    NOT_ASSIGNED,
    CONFLICT,
    "NOT_ASSIGNED",
    "reviewer is not assigned to this PR"
);
const_error!(
    NO_CANDIDATE,
    CONFLICT,
    "NO_CANDIDATE",
    "no active replacement candidate in team"
);
const_error!(NOT_FOUND, NOT_FOUND, "NOT_FOUND", "resource not found");
