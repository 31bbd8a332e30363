/*!

This is the long-form manual for `topsis_scoring` and `topsisrank`.

## The method

TOPSIS ranks a set of alternatives against a set of numeric criteria by
measuring how close each alternative sits to an ideal-best point and how far
it sits from an ideal-worst point, in a normalized and weighted criteria
space. The score of an alternative is

```text
score = dist_worst / (dist_best + dist_worst)
```

where both distances are Euclidean. Scores fall in `[0, 1]` and a higher
score is better. Rank 1 is the best alternative; alternatives with equal
scores are ranked in their input order.

## Input format

The input table is expected to look as follows (CSV shown, Excel `.xlsx`
files with the same shape are also accepted):

```text
Model,Price,Storage,Camera,Battery
P1,250,64,12,4000
P2,200,32,8,3500
P3,300,128,16,4500
```

The first row is the header. The first column holds the labels of the
alternatives; every other column must be numeric. At least two rows and two
criterion columns are required.

## Weights and impacts

Both vectors are given as comma-separated lists with one entry per
criterion column, in column order:

* weights: positive numbers, e.g. `1,1,1,2`. Only the relative proportions
  matter; scaling all the weights by the same factor does not change the
  ranking.
* impacts: `+` for a criterion where higher is better, `-` for a criterion
  where lower is better, e.g. `-,+,+,+`.

## Output

The output table is the input table with two extra columns:

* `Topsis Score`: the score on a 0-100 scale, rounded to two decimals.
* `Rank`: 1 for the best alternative.

Writing to a path with a `.json` extension produces the same rows as an
array of JSON records instead of CSV.

## HTTP service

`topsisrank --serve 127.0.0.1:8080` exposes the scorer over HTTP:

* `GET /health` returns `{"status":"ok"}`.
* `POST /api/topsis` accepts a JSON body with the fields `csvData` (the
  CSV text), `weights`, `impacts` (the comma-separated vectors) and the
  optional `email` / `sendEmail` pair. It replies with
  `{"success":true,"results":[...],"message":"..."}`, or with
  `{"success":false,"error":"..."}` when the input is rejected.

Every request is scored independently; the service keeps no state between
requests.

## Email delivery

When an address is supplied (the `--email` flag or the `sendEmail` field),
the ranked CSV is delivered through an HTTP email API. The sender is
configured through environment variables:

* `RESEND_API_KEY`: the API key. Without it, delivery is skipped and the
  response says so.
* `TOPSIS_FROM_EMAIL`, `TOPSIS_FROM_NAME`: the sender identity (optional).

Delivery never affects the scoring result: a failed send is reported in the
outcome message and logged, nothing more.

 */
